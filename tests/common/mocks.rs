use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use todo_relay::{
    Error, Result,
    backend::{BackendReply, TodoBackend, TodoMethod},
};

/// Mock todos backend that records every forwarded call
#[derive(Debug)]
pub struct RecordingBackend {
    pub calls: Arc<Mutex<Vec<(TodoMethod, Option<Value>)>>>,
    pub reply: BackendReply,
    pub error: Option<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            reply: BackendReply {
                status: 200,
                body: json!({"data": []}),
            },
            error: None,
        }
    }

    pub fn with_reply(mut self, status: u16, body: Value) -> Self {
        self.reply = BackendReply { status, body };
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn calls(&self) -> Vec<(TodoMethod, Option<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TodoBackend for RecordingBackend {
    async fn forward(
        &self,
        method: TodoMethod,
        data: Option<&Value>,
    ) -> Result<BackendReply> {
        self.calls.lock().unwrap().push((method, data.cloned()));

        if let Some(error) = &self.error {
            return Err(Error::internal(error.clone()));
        }

        Ok(self.reply.clone())
    }
}
