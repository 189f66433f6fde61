/*
 * Copyright (C) 2023 Nils Asmussen, Barkhausen Institut
 *
 * This file is part of M3 (Microkernel-based SysteM for Heterogeneous Manycores).
 *
 * M3 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License version 2 as
 * published by the Free Software Foundation.
 *
 * M3 is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
 * General Public License version 2 for more details.
 */

//! Contains unittest utilities inspired by WvTest <https://github.com/apenwarr/wvtest>

use core::fmt;

/// Runs the tests
pub trait WvTester {
    /// Runs the given test suite
    fn run_suite(&mut self, name: &str, f: &dyn Fn(&mut dyn WvTester));
    /// Runs the given test
    fn run_test(&mut self, name: &str, file: &str, f: &dyn Fn(&mut dyn WvTester));
    /// Is called on succeeded tests
    fn test_succeeded(&mut self);
    /// Is called on test failures
    fn test_failed(&mut self);
}

/// The default implementation for the [`WvTester`]
#[derive(Default, Copy, Clone, Debug)]
pub struct DefaultWvTester {
    tests: u64,
    fails: u64,
}

impl DefaultWvTester {
    pub fn tests(&self) -> u64 {
        self.tests
    }

    pub fn failures(&self) -> u64 {
        self.fails
    }

    pub fn successes(&self) -> u64 {
        self.tests - self.fails
    }
}

impl WvTester for DefaultWvTester {
    fn run_suite(&mut self, name: &str, f: &dyn Fn(&mut dyn WvTester)) {
        println!("Running test suite {} ...\n", name);
        f(self);
        println!();
    }

    fn run_test(&mut self, name: &str, file: &str, f: &dyn Fn(&mut dyn WvTester)) {
        println!("Testing \"{}\" in {}:", name, file);
        f(self);
        println!();
    }

    fn test_succeeded(&mut self) {
        self.tests += 1;
    }

    fn test_failed(&mut self) {
        self.tests += 1;
        self.fails += 1;
    }
}

impl fmt::Display for DefaultWvTester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ran {} tests, {} succeeded, {} failed",
            self.tests(),
            self.successes(),
            self.failures()
        )
    }
}

/// Convenience macro that calls [`WvTester::run_suite`] and uses the function name as suite name
#[macro_export]
macro_rules! wv_run_suite {
    ($t:expr, $func:path) => {
        $t.run_suite(stringify!($func), &$func)
    };
}

/// Convenience macro that calls [`WvTester::run_test`] and uses the function name as test name
#[macro_export]
macro_rules! wv_run_test {
    ($t:expr, $func:path) => {
        $t.run_test(stringify!($func), file!(), &$func)
    };
}

/// Tests whether $a is true and reports failures
#[macro_export]
macro_rules! wv_assert {
    ($t:expr, $a:expr) => {{
        if $a {
            $t.test_succeeded();
        }
        else {
            println!("! {}:{}  {} FAILED", file!(), line!(), stringify!($a));
            $t.test_failed();
        }
    }};
}

/// Tests whether $a and $b are equal and reports failures
#[macro_export]
macro_rules! wv_assert_eq {
    ($t:expr, $a:expr, $b:expr) => {{
        let (a_val, b_val) = (&$a, &$b);
        if *a_val == *b_val {
            $t.test_succeeded();
        }
        else {
            println!("! {}:{}  {:?} == {:?} FAILED", file!(), line!(), a_val, b_val);
            $t.test_failed();
        }
    }};
}

/// Tests whether $res is [`Ok`] and returns the inner value
///
/// An error is reported as failure and stops the run, because the following checks depend on the
/// value.
#[macro_export]
macro_rules! wv_assert_ok {
    ($t:expr, $res:expr) => {{
        match $res {
            Ok(r) => {
                $t.test_succeeded();
                r
            },
            Err(e) => {
                println!(
                    "! {}:{}  expected Ok for {}, got {:?} FAILED",
                    file!(),
                    line!(),
                    stringify!($res),
                    e
                );
                $t.test_failed();
                panic!("stopping the run")
            },
        }
    }};
}

/// Tests whether $res is [`Err`] with the error code $err
#[macro_export]
macro_rules! wv_assert_err {
    ($t:expr, $res:expr, $err:expr) => {{
        match $res {
            Ok(r) => {
                println!("! {}:{}  received okay: {:?} FAILED", file!(), line!(), r);
                $t.test_failed();
            },
            Err(e) if e.code() != $err => {
                println!(
                    "! {}:{}  received error {:?}, expected {:?} FAILED",
                    file!(),
                    line!(),
                    e,
                    $err
                );
                $t.test_failed();
            },
            Err(_) => $t.test_succeeded(),
        }
    }};
}
