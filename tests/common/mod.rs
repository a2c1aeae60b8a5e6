#![allow(dead_code)]

use bsdvis::host::Host;
use proptest::prelude::ProptestConfig;
use std::cell::RefCell;
use std::fmt::Arguments;

pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn proptest_config(cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}

/// A [`Host`] that keeps every diagnostic it receives.
#[derive(Default)]
pub struct RecordingHost {
    pub warnings: RefCell<Vec<String>>,
    pub errors: RefCell<Vec<String>>,
}

impl Host for RecordingHost {
    fn warning(&self, msg: Arguments<'_>) {
        log::warn!("{}", msg);
        self.warnings.borrow_mut().push(msg.to_string());
    }

    fn nonfatal(&self, msg: Arguments<'_>) {
        log::error!("{}", msg);
        self.errors.borrow_mut().push(msg.to_string());
    }
}
