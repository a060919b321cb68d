//! Shared test doubles.

use std::sync::Mutex;

use products_core::{ProductDto, Request};

use crate::service::probe::{events, Probe};
use crate::service::validation::{CreateArgs, ValidationError};
use crate::storage::PersistenceError;

/// Probe that records the names of emitted events in order.
#[derive(Debug, Default)]
pub struct RecordingProbe {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingProbe {
    pub fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: &'static str) {
        self.events.lock().unwrap().push(event);
    }
}

impl Probe for RecordingProbe {
    fn invalid_request_received(&self, _request: &Request) {
        self.push(events::INVALID_REQUEST_RECEIVED);
    }

    fn valid_request_received(&self, _request: &Request) {
        self.push(events::VALID_REQUEST_RECEIVED);
    }

    fn args_validation_succeeded(&self, _args: &CreateArgs) {
        self.push(events::ARGS_VALIDATION_SUCCEEDED);
    }

    fn args_validation_failed(&self, _error: &ValidationError) {
        self.push(events::ARGS_VALIDATION_FAILED);
    }

    fn saving_product_succeeded(&self, _product: &ProductDto) {
        self.push(events::SAVING_PRODUCT_SUCCEEDED);
    }

    fn saving_product_failed(&self, _error: &PersistenceError) {
        self.push(events::SAVING_PRODUCT_FAILED);
    }
}
