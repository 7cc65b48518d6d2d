// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scripted transport for device tests.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::TransportError;
use crate::protocol::{CallResult, Transport};
use crate::state::AvailabilitySink;

/// A recorded call: method path and query pairs.
pub(crate) type RecordedCall = (String, Vec<(String, String)>);

enum Scripted {
    Body(String),
    Unreachable,
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Scripted>,
    calls: Vec<RecordedCall>,
}

/// Replays queued replies in order and records every call.
///
/// Once the queue is empty every call fails as unreachable.
#[derive(Clone)]
pub(crate) struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
    availability: AvailabilitySink,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script::default())),
            availability: AvailabilitySink::new(),
        }
    }

    pub(crate) fn availability(&self) -> AvailabilitySink {
        self.availability.clone()
    }

    pub(crate) fn reply(&self, body: &str) {
        self.script
            .lock()
            .replies
            .push_back(Scripted::Body(body.to_string()));
    }

    pub(crate) fn fail_unreachable(&self) {
        self.script.lock().replies.push_back(Scripted::Unreachable);
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.script.lock().calls.clone()
    }

    pub(crate) fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|(method, _)| method).collect()
    }
}

impl std::fmt::Debug for ScriptedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedTransport").finish_non_exhaustive()
    }
}

impl Transport for ScriptedTransport {
    async fn call(&self, method: &str, query: &[(&'static str, String)]) -> CallResult {
        let next = {
            let mut script = self.script.lock();
            script.calls.push((
                method.to_string(),
                query
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), v.clone()))
                    .collect(),
            ));
            script.replies.pop_front()
        };

        let result = match next {
            Some(Scripted::Body(body)) => Ok(body.into_bytes()),
            Some(Scripted::Unreachable) | None => {
                Err(TransportError::ConnectionFailed("scripted".to_string()))
            }
        };
        self.availability.report(result.as_ref().map(|_| ()));
        result
    }
}
