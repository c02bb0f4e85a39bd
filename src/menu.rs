//! Interactive text menu over the fittrack query API.
//!
//! The menu reads choices line by line from any [`BufRead`] and writes to any
//! [`Write`], so the binary drives it with stdin/stdout and tests drive it
//! with in-memory buffers. End of input leaves every menu level at once.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use fittrack_common::{
    validation, EntityKind, ExerciseId, UserId, WorkoutExerciseId, WorkoutId,
};
use fittrack_db::models::WorkoutExerciseDetail;
use fittrack_db::pool::{get_conn, DbPool};
use fittrack_db::queries::{exercises, users, workout_exercises, workouts};

/// What the caller should do after an action finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

type Action<R, W> = fn(&mut Menu<R, W>) -> Result<Flow>;

const MAIN_OPTIONS: &[&str] = &[
    "User Management",
    "Exercise Management",
    "Workout Management",
    "Workout Exercise Management",
    "Exit",
];

const USER_OPTIONS: &[&str] = &[
    "Create New User",
    "View All Users",
    "Find User by ID",
    "Delete User",
    "View User's Workouts",
];

const EXERCISE_OPTIONS: &[&str] = &[
    "Create New Exercise",
    "View All Exercises",
    "Find Exercise by ID",
    "Delete Exercise",
    "View Exercise Usage in Workouts",
];

const WORKOUT_OPTIONS: &[&str] = &[
    "Create New Workout",
    "View All Workouts",
    "Find Workout by ID",
    "Delete Workout",
    "View Workout Exercises",
];

const ENTRY_OPTIONS: &[&str] = &[
    "Add Exercise to Workout",
    "View All Workout Exercises",
    "Find Workout Exercise by ID",
    "Update Sets/Reps/Weight",
    "Remove Exercise from Workout",
];

/// Menu-driven front end.
pub struct Menu<R, W> {
    pool: DbPool,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(pool: DbPool, input: R, output: W) -> Self {
        Self {
            pool,
            input,
            output,
        }
    }

    /// Run the main menu until the user exits or input ends.
    ///
    /// Validation and missing-reference errors are printed and the menu
    /// carries on. Storage failures abort the menu.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(choice) = self.choose("FITNESS TRACKER MAIN MENU", MAIN_OPTIONS)? else {
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.user_menu()?,
                "2" => self.exercise_menu()?,
                "3" => self.workout_menu()?,
                "4" => self.entry_menu()?,
                "5" | "0" => break,
                _ => {
                    self.say("Invalid choice.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }

        self.say("Goodbye!")?;
        Ok(())
    }

    fn user_menu(&mut self) -> Result<Flow> {
        self.submenu(
            "USER MANAGEMENT",
            USER_OPTIONS,
            &[
                Self::create_user,
                Self::view_users,
                Self::find_user,
                Self::delete_user,
                Self::view_user_workouts,
            ],
        )
    }

    fn exercise_menu(&mut self) -> Result<Flow> {
        self.submenu(
            "EXERCISE MANAGEMENT",
            EXERCISE_OPTIONS,
            &[
                Self::create_exercise,
                Self::view_exercises,
                Self::find_exercise,
                Self::delete_exercise,
                Self::view_exercise_usage,
            ],
        )
    }

    fn workout_menu(&mut self) -> Result<Flow> {
        self.submenu(
            "WORKOUT MANAGEMENT",
            WORKOUT_OPTIONS,
            &[
                Self::create_workout,
                Self::view_workouts,
                Self::find_workout,
                Self::delete_workout,
                Self::view_workout_entries,
            ],
        )
    }

    fn entry_menu(&mut self) -> Result<Flow> {
        self.submenu(
            "WORKOUT EXERCISE MANAGEMENT",
            ENTRY_OPTIONS,
            &[
                Self::add_entry,
                Self::view_entries,
                Self::find_entry,
                Self::update_entry,
                Self::remove_entry,
            ],
        )
    }

    fn submenu(
        &mut self,
        title: &str,
        options: &[&str],
        actions: &[Action<R, W>],
    ) -> Result<Flow> {
        loop {
            let Some(choice) = self.choose(title, options)? else {
                return Ok(Flow::Quit);
            };

            let action = match choice.parse::<usize>() {
                Ok(0) => return Ok(Flow::Continue),
                Ok(n) if n <= actions.len() => actions[n - 1],
                _ => {
                    self.say("Invalid choice.")?;
                    continue;
                }
            };

            if action(self)? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    // Users

    fn create_user(&mut self) -> Result<Flow> {
        let Some(name) = self.ask_text("Enter name: ", |s| {
            validation::validate_name(EntityKind::User, s)
        })?
        else {
            return Ok(Flow::Quit);
        };
        let Some(email) = self.ask_text("Enter email: ", validation::validate_email)? else {
            return Ok(Flow::Quit);
        };

        let conn = get_conn(&self.pool)?;
        if let Some(user) = self.recover(users::create_user(&conn, &name, &email))? {
            self.say(&format!("User created with ID {}", user.id()))?;
        }
        Ok(Flow::Continue)
    }

    fn view_users(&mut self) -> Result<Flow> {
        let conn = get_conn(&self.pool)?;
        let all = users::list_users(&conn)?;

        if all.is_empty() {
            self.say("No users found.")?;
        } else {
            self.say("\nAll Users:")?;
            for user in &all {
                self.say(&format!(
                    "ID: {}, Name: {}, Email: {}",
                    user.id(),
                    user.name(),
                    user.email()
                ))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn find_user(&mut self) -> Result<Flow> {
        let Some(id) = self.ask_id::<UserId>("Enter user ID: ")? else {
            return Ok(Flow::Quit);
        };

        let conn = get_conn(&self.pool)?;
        match users::get_user(&conn, id)? {
            Some(user) => self.say(&format!(
                "ID: {}, Name: {}, Email: {}",
                user.id(),
                user.name(),
                user.email()
            ))?,
            None => self.say("User not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn delete_user(&mut self) -> Result<Flow> {
        let Some(id) = self.ask_id::<UserId>("Enter user ID to delete: ")? else {
            return Ok(Flow::Quit);
        };

        let conn = get_conn(&self.pool)?;
        if users::delete_user(&conn, id)? {
            self.say("User deleted successfully.")?;
        } else {
            self.say("User not found.")?;
        }
        Ok(Flow::Continue)
    }

    fn view_user_workouts(&mut self) -> Result<Flow> {
        let Some(id) = self.ask_id::<UserId>("Enter user ID: ")? else {
            return Ok(Flow::Quit);
        };

        let conn = get_conn(&self.pool)?;
        let Some(user) = users::get_user(&conn, id)? else {
            self.say("User not found.")?;
            return Ok(Flow::Continue);
        };

        let owned = workouts::list_workouts_for_user(&conn, id)?;
        if owned.is_empty() {
            self.say(&format!("{} has no workouts.", user.name()))?;
        } else {
            self.say(&format!("\nWorkouts for {}:", user.name()))?;
            for workout in &owned {
                self.say(&format!(
                    "ID: {}, Name: {}, Date: {}",
                    workout.id(),
                    workout.name(),
                    workout.date().format("%Y-%m-%d %H:%M")
                ))?;
            }
        }
        Ok(Flow::Continue)
    }

    // Exercises

    fn create_exercise(&mut self) -> Result<Flow> {
        let Some(name) = self.ask_text("Enter exercise name: ", |s| {
            validation::validate_name(EntityKind::Exercise, s)
        })?
        else {
            return Ok(Flow::Quit);
        };
        let Some(description) = self.read_line("Enter description (optional): ")? else {
            return Ok(Flow::Quit);
        };
        let description = Some(description.as_str()).filter(|d| !d.trim().is_empty());

        let conn = get_conn(&self.pool)?;
        if let Some(exercise) =
            self.recover(exercises::create_exercise(&conn, &name, description))?
        {
            self.say(&format!("Exercise created with ID {}", exercise.id()))?;
        }
        Ok(Flow::Continue)
    }

    fn view_exercises(&mut self) -> Result<Flow> {
        let conn = get_conn(&self.pool)?;
        let all = exercises::list_exercises(&conn)?;

        if all.is_empty() {
            self.say("No exercises found.")?;
        } else {
            self.say("\nAll Exercises:")?;
            for exercise in &all {
                self.say(&format!(
                    "ID: {}, Name: {}, Description: {}",
                    exercise.id(),
                    exercise.name(),
                    exercise.description().unwrap_or("-")
                ))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn find_exercise(&mut self) -> Result<Flow> {
        let Some(id) = self.ask_id::<ExerciseId>("Enter exercise ID: ")? else {
            return Ok(Flow::Quit);
        };

        let conn = get_conn(&self.pool)?;
        match exercises::get_exercise(&conn, id)? {
            Some(exercise) => self.say(&format!(
                "ID: {}, Name: {}, Description: {}",
                exercise.id(),
                exercise.name(),
                exercise.description().unwrap_or("-")
            ))?,
            None => self.say("Exercise not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn delete_exercise(&mut self) -> Result<Flow> {
        let Some(id) = self.ask_id::<ExerciseId>("Enter exercise ID to delete: ")? else {
            return Ok(Flow::Quit);
        };

        let conn = get_conn(&self.pool)?;
        if exercises::delete_exercise(&conn, id)? {
            self.say("Exercise deleted successfully.")?;
        } else {
            self.say("Exercise not found.")?;
        }
        Ok(Flow::Continue)
    }

    fn view_exercise_usage(&mut self) -> Result<Flow> {
        let Some(id) = self.ask_id::<ExerciseId>("Enter exercise ID: ")? else {
            return Ok(Flow::Quit);
        };

        let conn = get_conn(&self.pool)?;
        let Some(exercise) = exercises::get_exercise(&conn, id)? else {
            self.say("Exercise not found.")?;
            return Ok(Flow::Continue);
        };

        let uses = workout_exercises::list_details_for_exercise(&conn, id)?;
        if uses.is_empty() {
            self.say(&format!("{} is not used in any workouts.", exercise.name()))?;
        } else {
            self.say(&format!("\nWorkouts containing {}:", exercise.name()))?;
            for detail in &uses {
                self.say(&format!(
                    "Workout ID: {}, Name: {}, User: {}, {}",
                    detail.entry.workout_id(),
                    detail.workout_name,
                    detail.user_name,
                    metrics(detail)
                ))?;
            }
        }
        Ok(Flow::Continue)
    }

    // Workouts

    fn create_workout(&mut self) -> Result<Flow> {
        let Some(name) = self.ask_text("Enter workout name: ", |s| {
            validation::validate_name(EntityKind::Workout, s)
        })?
        else {
            return Ok(Flow::Quit);
        };

        {
            let conn = get_conn(&self.pool)?;
            let all = users::list_users(&conn)?;
            if all.is_empty() {
                self.say("No users found. Please create a user first.")?;
                return Ok(Flow::Continue);
            }

            self.say("\nAvailable Users:")?;
            for user in &all {
                self.say(&format!("ID: {}, Name: {}", user.id(), user.name()))?;
            }
        }

        let Some(user_id) = self.ask_id::<UserId>("Enter user ID: ")? else {
            return Ok(Flow::Quit);
        };

        let conn = get_conn(&self.pool)?;
        if let Some(workout) = self.recover(workouts::create_workout(&conn, &name, user_id))? {
            self.say(&format!("Workout created with ID {}", workout.id()))?;
        }
        Ok(Flow::Continue)
    }

    fn view_workouts(&mut self) -> Result<Flow> {
        let conn = get_conn(&self.pool)?;
        let all = workouts::list_workouts(&conn)?;

        if all.is_empty() {
            self.say("No workouts found.")?;
            return Ok(Flow::Continue);
        }

        self.say("\nAll Workouts:")?;
        for workout in &all {
            let owner = workouts::get_workout_owner(&conn, workout.id())?;
            self.say(&format!(
                "ID: {}, Name: {}, Date: {}, User: {}",
                workout.id(),
                workout.name(),
                workout.date().format("%Y-%m-%d %H:%M"),
                owner.as_ref().map_or("-", |u| u.name())
            ))?;
        }
        Ok(Flow::Continue)
    }

    fn find_workout(&mut self) -> Result<Flow> {
        let Some(id) = self.ask_id::<WorkoutId>("Enter workout ID: ")? else {
            return Ok(Flow::Quit);
        };

        let conn = get_conn(&self.pool)?;
        let Some(workout) = workouts::get_workout(&conn, id)? else {
            self.say("Workout not found.")?;
            return Ok(Flow::Continue);
        };

        let owner = workouts::get_workout_owner(&conn, id)?;
        self.say(&format!(
            "ID: {}, Name: {}, Date: {}, User: {}",
            workout.id(),
            workout.name(),
            workout.date().format("%Y-%m-%d %H:%M"),
            owner.as_ref().map_or("-", |u| u.name())
        ))?;
        Ok(Flow::Continue)
    }

    fn delete_workout(&mut self) -> Result<Flow> {
        let Some(id) = self.ask_id::<WorkoutId>("Enter workout ID to delete: ")? else {
            return Ok(Flow::Quit);
        };

        let conn = get_conn(&self.pool)?;
        if workouts::delete_workout(&conn, id)? {
            self.say("Workout deleted successfully.")?;
        } else {
            self.say("Workout not found.")?;
        }
        Ok(Flow::Continue)
    }

    fn view_workout_entries(&mut self) -> Result<Flow> {
        let Some(id) = self.ask_id::<WorkoutId>("Enter workout ID: ")? else {
            return Ok(Flow::Quit);
        };

        let conn = get_conn(&self.pool)?;
        let Some(workout) = workouts::get_workout(&conn, id)? else {
            self.say("Workout not found.")?;
            return Ok(Flow::Continue);
        };

        let entries = workout_exercises::list_details_for_workout(&conn, id)?;
        if entries.is_empty() {
            self.say(&format!(
                "Workout '{}' doesn't have any exercises.",
                workout.name()
            ))?;
        } else {
            self.say(&format!("\nExercises in '{}':", workout.name()))?;
            for detail in &entries {
                self.say(&format!(
                    "Exercise: {}, {}",
                    detail.exercise_name,
                    metrics(detail)
                ))?;
            }
        }
        Ok(Flow::Continue)
    }

    // Workout entries

    fn add_entry(&mut self) -> Result<Flow> {
        {
            let conn = get_conn(&self.pool)?;
            let all = workouts::list_workouts(&conn)?;
            if all.is_empty() {
                self.say("No workouts found. Please create a workout first.")?;
                return Ok(Flow::Continue);
            }
            if exercises::count_exercises(&conn)? == 0 {
                self.say("No exercises found. Please create an exercise first.")?;
                return Ok(Flow::Continue);
            }

            self.say("\nAvailable Workouts:")?;
            for workout in &all {
                self.say(&format!("ID: {}, Name: {}", workout.id(), workout.name()))?;
            }
        }

        let Some(workout_id) = self.ask_id::<WorkoutId>("Enter workout ID: ")? else {
            return Ok(Flow::Quit);
        };

        {
            let conn = get_conn(&self.pool)?;
            self.say("\nAvailable Exercises:")?;
            for exercise in &exercises::list_exercises(&conn)? {
                self.say(&format!("ID: {}, Name: {}", exercise.id(), exercise.name()))?;
            }
        }

        let Some(exercise_id) = self.ask_id::<ExerciseId>("Enter exercise ID: ")? else {
            return Ok(Flow::Quit);
        };
        let Some((sets, reps, weight)) = self.ask_metrics("")? else {
            return Ok(Flow::Quit);
        };

        let conn = get_conn(&self.pool)?;
        let created = workout_exercises::create_workout_exercise(
            &conn,
            workout_id,
            exercise_id,
            sets,
            reps,
            weight,
        );
        if let Some(entry) = self.recover(created)? {
            self.say(&format!("Exercise added to workout with ID {}", entry.id()))?;
        }
        Ok(Flow::Continue)
    }

    fn view_entries(&mut self) -> Result<Flow> {
        let conn = get_conn(&self.pool)?;
        let all = workout_exercises::list_details(&conn)?;

        if all.is_empty() {
            self.say("No workout exercises found.")?;
        } else {
            self.say("\nAll Workout Exercises:")?;
            for detail in &all {
                self.say(&describe_entry(detail))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn find_entry(&mut self) -> Result<Flow> {
        let Some(id) = self.ask_id::<WorkoutExerciseId>("Enter workout exercise ID: ")? else {
            return Ok(Flow::Quit);
        };

        let conn = get_conn(&self.pool)?;
        match workout_exercises::get_detail(&conn, id)? {
            Some(detail) => self.say(&describe_entry(&detail))?,
            None => self.say("Workout exercise not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn update_entry(&mut self) -> Result<Flow> {
        let Some(id) = self.ask_id::<WorkoutExerciseId>("Enter workout exercise ID: ")? else {
            return Ok(Flow::Quit);
        };

        let Some(mut entry) = ({
            let conn = get_conn(&self.pool)?;
            workout_exercises::get_workout_exercise(&conn, id)?
        }) else {
            self.say("Workout exercise not found.")?;
            return Ok(Flow::Continue);
        };

        self.say(&format!(
            "Current: Sets: {}, Reps: {}, Weight: {}",
            entry.sets(),
            entry.reps(),
            entry.weight()
        ))?;
        let Some((sets, reps, weight)) = self.ask_metrics("new ")? else {
            return Ok(Flow::Quit);
        };

        let changed = entry
            .set_sets(sets)
            .and_then(|()| entry.set_reps(reps))
            .and_then(|()| entry.set_weight(weight));
        if self.recover(changed)?.is_none() {
            return Ok(Flow::Continue);
        }

        let conn = get_conn(&self.pool)?;
        if self
            .recover(workout_exercises::update_workout_exercise(&conn, &entry))?
            .is_some()
        {
            self.say("Workout exercise updated successfully.")?;
        }
        Ok(Flow::Continue)
    }

    fn remove_entry(&mut self) -> Result<Flow> {
        let Some(id) =
            self.ask_id::<WorkoutExerciseId>("Enter workout exercise ID to remove: ")?
        else {
            return Ok(Flow::Quit);
        };

        let conn = get_conn(&self.pool)?;
        if workout_exercises::delete_workout_exercise(&conn, id)? {
            self.say("Exercise removed from workout successfully.")?;
        } else {
            self.say("Workout exercise not found.")?;
        }
        Ok(Flow::Continue)
    }

    // Input and output helpers

    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    fn choose(&mut self, title: &str, options: &[&str]) -> io::Result<Option<String>> {
        writeln!(self.output, "\n===== {title} =====")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, option)?;
        }
        writeln!(self.output, "0. Back")?;

        Ok(self
            .read_line("\nEnter your choice: ")?
            .map(|choice| choice.trim().to_string()))
    }

    /// Prompt and read one line without its line terminator. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn ask_text(
        &mut self,
        prompt: &str,
        check: impl Fn(&str) -> fittrack_common::Result<()>,
    ) -> io::Result<Option<String>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match check(&line) {
                Ok(()) => return Ok(Some(line)),
                Err(e) => self.say(&e.to_string())?,
            }
        }
    }

    fn ask<T: FromStr>(
        &mut self,
        prompt: &str,
        error: &str,
        accept: impl Fn(&T) -> bool,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match line.trim().parse::<T>() {
                Ok(value) if accept(&value) => return Ok(Some(value)),
                _ => self.say(error)?,
            }
        }
    }

    fn ask_id<T: FromStr + Copy + Into<i64>>(&mut self, prompt: &str) -> io::Result<Option<T>> {
        self.ask(prompt, "ID must be a number", |id: &T| {
            Into::<i64>::into(*id) >= 0
        })
    }

    /// Ask for sets, reps and weight. `qualifier` is inserted into each prompt.
    fn ask_metrics(&mut self, qualifier: &str) -> io::Result<Option<(i64, i64, f64)>> {
        let Some(sets) = self.ask(
            &format!("Enter {qualifier}number of sets: "),
            "Sets must be a non-negative number",
            |v: &i64| validation::validate_sets(*v).is_ok(),
        )?
        else {
            return Ok(None);
        };
        let Some(reps) = self.ask(
            &format!("Enter {qualifier}number of reps: "),
            "Reps must be a non-negative number",
            |v: &i64| validation::validate_reps(*v).is_ok(),
        )?
        else {
            return Ok(None);
        };
        let Some(weight) = self.ask(
            &format!("Enter {qualifier}weight (kg): "),
            "Weight must be a non-negative number",
            |v: &f64| validation::validate_weight(*v).is_ok(),
        )?
        else {
            return Ok(None);
        };

        Ok(Some((sets, reps, weight)))
    }

    /// Print recoverable errors and turn them into `None`; pass the rest up.
    fn recover<T>(&mut self, result: fittrack_common::Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_recoverable() => {
                tracing::debug!("Rejected menu input: {}", e);
                self.say(&format!("Error: {e}"))?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn metrics(detail: &WorkoutExerciseDetail) -> String {
    format!(
        "Sets: {}, Reps: {}, Weight: {}",
        detail.entry.sets(),
        detail.entry.reps(),
        detail.entry.weight()
    )
}

fn describe_entry(detail: &WorkoutExerciseDetail) -> String {
    format!(
        "ID: {}, Workout: {}, Exercise: {}, {}",
        detail.entry.id(),
        detail.workout_name,
        detail.exercise_name,
        metrics(detail)
    )
}
