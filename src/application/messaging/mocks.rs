//! Recording capability doubles for unit tests

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::errors::{CapabilityError, CapabilityResult};
use crate::domain::entities::Ticket;
use crate::domain::traits::{AiCapability, ChatCapability, Generation, TicketCapability};

pub struct MockChat {
    members: Vec<String>,
    members_error: Option<CapabilityError>,
    send_error: Option<CapabilityError>,
    delete_result: bool,
    panic_on_send: bool,
    sent: Mutex<Vec<(String, String)>>,
    send_attempts: Mutex<usize>,
    deleted: Mutex<Vec<(String, String)>>,
}

impl Default for MockChat {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            members_error: None,
            send_error: None,
            delete_result: true,
            panic_on_send: false,
            sent: Mutex::new(Vec::new()),
            send_attempts: Mutex::new(0),
            deleted: Mutex::new(Vec::new()),
        }
    }
}

impl MockChat {
    pub fn with_members(members: Vec<&str>) -> Self {
        Self {
            members: members.into_iter().map(String::from).collect(),
            ..Self::default()
        }
    }

    pub fn failing_members(mut self, err: CapabilityError) -> Self {
        self.members_error = Some(err);
        self
    }

    pub fn failing_send(mut self, err: CapabilityError) -> Self {
        self.send_error = Some(err);
        self
    }

    pub fn panicking_send(mut self) -> Self {
        self.panic_on_send = true;
        self
    }

    pub fn delete_result(mut self, result: bool) -> Self {
        self.delete_result = result;
        self
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }

    pub fn send_attempts(&self) -> usize {
        *self.send_attempts.lock().unwrap()
    }

    pub fn deleted(&self) -> Vec<(String, String)> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCapability for MockChat {
    async fn send(&self, channel_id: &str, text: &str) -> CapabilityResult<bool> {
        *self.send_attempts.lock().unwrap() += 1;
        if self.panic_on_send {
            panic!("chat backend bug");
        }
        if let Some(err) = &self.send_error {
            return Err(err.clone());
        }
        self.sent
            .lock()
            .unwrap()
            .push((channel_id.to_string(), text.to_string()));
        Ok(true)
    }

    async fn get_channel_members(&self, _channel_id: &str) -> CapabilityResult<Vec<String>> {
        match &self.members_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.members.clone()),
        }
    }

    async fn delete_message(&self, channel_id: &str, message_id: &str) -> CapabilityResult<bool> {
        self.deleted
            .lock()
            .unwrap()
            .push((channel_id.to_string(), message_id.to_string()));
        Ok(self.delete_result)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

pub struct MockAi {
    result: CapabilityResult<Generation>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockAi {
    pub fn replying(text: &str) -> Self {
        Self::with_result(Ok(Generation::Text(text.to_string())))
    }

    pub fn structured(value: serde_json::Value) -> Self {
        Self::with_result(Ok(Generation::Structured(value)))
    }

    pub fn failing(err: CapabilityError) -> Self {
        Self::with_result(Err(err))
    }

    fn with_result(result: CapabilityResult<Generation>) -> Self {
        Self {
            result,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn system_prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, s)| s.clone()).collect()
    }
}

#[async_trait]
impl AiCapability for MockAi {
    async fn generate(
        &self,
        user_input: &str,
        system_prompt: &str,
        _response_schema: Option<&serde_json::Value>,
    ) -> CapabilityResult<Generation> {
        self.calls
            .lock()
            .unwrap()
            .push((user_input.to_string(), system_prompt.to_string()));
        self.result.clone()
    }
}

#[derive(Default)]
pub struct MockTickets {
    tickets: Vec<Ticket>,
    error: Option<CapabilityError>,
    created: Mutex<Vec<(String, String)>>,
}

impl MockTickets {
    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        Self {
            tickets,
            ..Self::default()
        }
    }

    pub fn failing(err: CapabilityError) -> Self {
        Self {
            error: Some(err),
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<(String, String)> {
        self.created.lock().unwrap().clone()
    }

    fn check(&self) -> CapabilityResult<()> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TicketCapability for MockTickets {
    async fn create(&self, title: &str, description: &str) -> CapabilityResult<Ticket> {
        self.check()?;
        let mut created = self.created.lock().unwrap();
        created.push((title.to_string(), description.to_string()));
        let key = format!("OPS-{}", created.len());
        Ok(Ticket::new(&key, title)
            .with_description(description)
            .with_url(format!("https://tracker.example/browse/{}", key)))
    }

    async fn get(&self, key: &str) -> CapabilityResult<Option<Ticket>> {
        self.check()?;
        Ok(self.tickets.iter().find(|t| t.key == key).cloned())
    }

    async fn search(&self, query: &str, limit: usize) -> CapabilityResult<Vec<Ticket>> {
        self.check()?;
        let query = query.to_lowercase();
        Ok(self
            .tickets
            .iter()
            .filter(|t| t.title.to_lowercase().contains(&query))
            .take(limit)
            .cloned()
            .collect())
    }
}
