//! Test support: an in-process room service and session helpers.

use crate::connection::Session;
use crate::server::RelayState;
use async_trait::async_trait;
use parking_lot::Mutex;
use relay_backend::{BackendError, BackendRequest, BackendResult, RoomBackend};
use relay_common::AppConfig;
use relay_core::Message;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Room service returning scripted replies and recording every request
#[derive(Default)]
pub struct FakeBackend {
    replies: Mutex<VecDeque<BackendResult<Vec<Message>>>>,
    requests: Mutex<Vec<BackendRequest>>,
}

impl FakeBackend {
    pub fn reply(&self, messages: Vec<Message>) {
        self.replies.lock().push_back(Ok(messages));
    }

    pub fn fail(&self, error: BackendError) {
        self.replies.lock().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl RoomBackend for FakeBackend {
    async fn call(&self, request: &BackendRequest) -> BackendResult<Vec<Message>> {
        self.requests.lock().push(request.clone());
        self.replies.lock().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn test_state(room_id: Option<&str>) -> RelayState {
    test_state_with(room_id, Arc::new(FakeBackend::default()))
}

pub fn test_state_with(room_id: Option<&str>, backend: Arc<FakeBackend>) -> RelayState {
    let mut config = AppConfig::default();
    config.room.id = room_id.map(str::to_string);
    RelayState::new(config, backend)
}

/// Anonymous session with its outbound queue
pub fn connect(buffer: usize) -> (Arc<Session>, mpsc::Receiver<String>) {
    let (tx, rx) = mpsc::channel(buffer);
    (Session::new(tx), rx)
}

/// Session bound to `user_id` and registered
pub fn identify(
    state: &RelayState,
    user_id: &str,
    buffer: usize,
) -> (Arc<Session>, mpsc::Receiver<String>) {
    let (session, rx) = connect(buffer);
    session.bind_user(user_id).unwrap();
    state.registry().register(user_id, session.clone());
    (session, rx)
}
