// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP bridge to the upstream session holder
//!
//! The process owning the exclusive upstream session exposes one endpoint;
//! this client posts the target's opaque document id to it. The call is
//! blocking (`ureq`), so it runs on the blocking pool.

use async_trait::async_trait;
use fx_core::{FocusTarget, StatusClient, StatusError};

/// HTTP-based status client
#[derive(Clone, Debug)]
pub struct BridgeClient {
    base_url: String,
}

impl BridgeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }
}

#[async_trait]
impl StatusClient for BridgeClient {
    async fn set_status(&self, target: FocusTarget) -> Result<(), StatusError> {
        let url = format!("{}/status", self.base_url);
        let body = serde_json::json!({ "documentId": target.document_id() }).to_string();

        let result = tokio::task::spawn_blocking(move || {
            ureq::post(&url)
                .header("content-type", "application/json")
                .send(&body)
                .map(|_| ())
        })
        .await;

        match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(ureq::Error::StatusCode(code))) => Err(StatusError::Rejected(format!(
                "upstream returned {}",
                code
            ))),
            Ok(Err(e)) => Err(StatusError::Unreachable(e.to_string())),
            Err(e) => Err(StatusError::Unreachable(format!("join error: {}", e))),
        }
    }
}
