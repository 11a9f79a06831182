//! The static table of provider operations and their URL path templates.
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Method;

use crate::OvoApiError;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r":[a-zA-Z0-9_]+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
}

impl Verb {
    pub fn method(&self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
        }
    }

    /// Mutating verbs carry a form-encoded body.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Verb::Post | Verb::Put)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub path: &'static str,
    pub verb: Verb,
}

#[rustfmt::skip]
pub const OPERATIONS: &[Operation] = &[
    Operation { name: "customer_profile", path: "/customers/:customer_id", verb: Verb::Get },
    Operation {
        name: "customer_profile_qr",
        path: "/merchants/:merchant_id/stores/:store_id/terminals/:terminal_id/customers",
        verb: Verb::Get,
    },
    Operation { name: "calculate_points", path: "/customers/:customer_id/points", verb: Verb::Put },
    Operation { name: "pushtopay_transaction", path: "/customers/:customer_id/transactions", verb: Verb::Post },
    Operation {
        name: "pushtopay_transaction_status",
        path: "/customers/:customer_id/transactions/:transaction_id",
        verb: Verb::Get,
    },
    Operation {
        name: "pushtopay_void_transaction",
        path: "/customers/:customer_id/transactions/:transaction_id",
        verb: Verb::Put,
    },
    Operation { name: "customer_linkage", path: "/customers/:customer_id", verb: Verb::Post },
    Operation { name: "customer_authentication", path: "/authentications", verb: Verb::Post },
    Operation {
        name: "customer_authentication_status",
        path: "/authentications/:authentication_id",
        verb: Verb::Get,
    },
];

pub fn find_operation(name: &str) -> Result<&'static Operation, OvoApiError> {
    OPERATIONS.iter().find(|op| op.name == name).ok_or_else(|| OvoApiError::UnknownOperation(name.to_string()))
}

impl Operation {
    /// The placeholder tokens (e.g. `:customer_id`) of the path template, in the order they appear.
    pub fn placeholders(&self) -> Vec<&'static str> {
        PLACEHOLDER.find_iter(self.path).map(|m| m.as_str()).collect()
    }

    /// Substitutes `params` into the path template positionally. Each placeholder consumes exactly one parameter,
    /// which is percent-encoded.
    pub fn resolve_path(&self, params: &[&str]) -> Result<String, OvoApiError> {
        let expected = self.placeholders().len();
        if expected != params.len() {
            return Err(OvoApiError::ParameterCountMismatch {
                operation: self.name.to_string(),
                expected,
                supplied: params.len(),
            });
        }
        let mut path = String::with_capacity(self.path.len());
        let mut last = 0;
        for (m, param) in PLACEHOLDER.find_iter(self.path).zip(params) {
            path.push_str(&self.path[last..m.start()]);
            path.push_str(&urlencoding::encode(param));
            last = m.end();
        }
        path.push_str(&self.path[last..]);
        Ok(path)
    }
}
