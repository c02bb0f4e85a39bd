//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which owns an in-memory database pool and can
//! drive the interactive [`Menu`] with a scripted input.

#![allow(dead_code)]

use std::io::Cursor;

use fittrack::menu::Menu;
use fittrack::seed::seed_demo_data;
use fittrack_db::pool::{get_conn, init_memory_pool, DbPool, PooledConnection};

/// Test harness backed by an in-memory database.
pub struct TestHarness {
    pub db: DbPool,
}

impl TestHarness {
    /// Create a new harness with an empty database.
    pub fn new() -> Self {
        let db = init_memory_pool().expect("failed to create in-memory pool");
        Self { db }
    }

    /// Create a new harness loaded with the demo data set.
    pub fn seeded() -> Self {
        let harness = Self::new();
        seed_demo_data(&harness.conn()).expect("failed to seed demo data");
        harness
    }

    /// Get a database connection from the pool.
    ///
    /// The in-memory pool holds one connection; drop the guard before
    /// running the menu.
    pub fn conn(&self) -> PooledConnection {
        get_conn(&self.db).expect("failed to get db connection")
    }

    /// Feed `script` to the menu, one answer per line, and return everything
    /// it printed.
    pub fn run_menu(&self, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(self.db.clone(), Cursor::new(script), &mut output)
            .run()
            .expect("menu failed");
        String::from_utf8(output).expect("menu output is not UTF-8")
    }
}
