/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Message and payload data model handed to handlers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque header map carried alongside a payload.
///
/// The router places no requirement on header shape; headers pass through to
/// handlers untouched.
pub type Headers = Map<String, Value>;

/// Payload handed to handlers untouched.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub enum Payload {
    #[default]
    Empty,
    Bytes(Vec<u8>),
    Text(String),
    Json(Value),
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Bytes(bytes.to_vec())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

/// One dispatched message: the concrete subject plus opaque payload and
/// headers.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Message {
    subject: String,
    payload: Payload,
    headers: Headers,
}

impl Message {
    pub fn new(subject: impl Into<String>, payload: impl Into<Payload>) -> Self {
        Self {
            subject: subject.into(),
            payload: payload.into(),
            headers: Headers::new(),
        }
    }

    pub fn with_headers(
        subject: impl Into<String>,
        payload: impl Into<Payload>,
        headers: Headers,
    ) -> Self {
        Self {
            subject: subject.into(),
            payload: payload.into(),
            headers,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }
}
