//! Shared test doubles for producer integration tests

#![allow(dead_code)]

use courier_core::{
    Acquired, CallStatus, ConnectionHandle, Credentials, Message, ObjectHandle, OpenMode,
};
use courier_ports::{BrokerGateway, Sleeper};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// One call observed by the scripted gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Connect(String),
    Open(String),
    Put(Vec<u8>),
    Close,
    Disconnect,
}

/// Gateway with scripted answers that records every call
///
/// Puts answer from the script in order, then succeed.
pub struct ScriptedGateway {
    connect: CallStatus,
    open: CallStatus,
    puts: Mutex<VecDeque<CallStatus>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            connect: CallStatus::ok(),
            open: CallStatus::ok(),
            puts: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn connect_returns(mut self, status: CallStatus) -> Self {
        self.connect = status;
        self
    }

    pub fn open_returns(mut self, status: CallStatus) -> Self {
        self.open = status;
        self
    }

    pub fn puts_return(self, script: impl IntoIterator<Item = CallStatus>) -> Self {
        self.puts.lock().unwrap().extend(script);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matcher: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| matcher(c)).count()
    }

    pub fn puts(&self) -> Vec<Vec<u8>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Put(payload) => Some(payload),
                _ => None,
            })
            .collect()
    }

    fn log(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl BrokerGateway for ScriptedGateway {
    fn connect(
        &self,
        queue_manager: &str,
        _credentials: &Credentials,
    ) -> Acquired<ConnectionHandle> {
        self.log(Call::Connect(queue_manager.to_string()));
        if self.connect.is_failed() {
            Acquired::refused(self.connect)
        } else {
            Acquired::granted(ConnectionHandle(1), self.connect)
        }
    }

    fn open(
        &self,
        _connection: ConnectionHandle,
        destination: &str,
        _mode: OpenMode,
    ) -> Acquired<ObjectHandle> {
        self.log(Call::Open(destination.to_string()));
        if self.open.is_failed() {
            Acquired::refused(self.open)
        } else {
            Acquired::granted(ObjectHandle(2), self.open)
        }
    }

    fn put(
        &self,
        _connection: ConnectionHandle,
        _object: ObjectHandle,
        message: &Message,
    ) -> CallStatus {
        self.log(Call::Put(message.payload().to_vec()));
        self.puts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(CallStatus::ok)
    }

    fn close(&self, _connection: ConnectionHandle, _object: ObjectHandle) -> CallStatus {
        self.log(Call::Close);
        CallStatus::ok()
    }

    fn disconnect(&self, _connection: ConnectionHandle) -> CallStatus {
        self.log(Call::Disconnect);
        CallStatus::ok()
    }

    fn name(&self) -> &str {
        "ScriptedGateway"
    }
}

/// Sleeper that records requested pauses instead of waiting
#[derive(Default)]
pub struct RecordingSleeper {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.pauses.lock().unwrap().push(duration);
    }
}

pub fn credentials() -> Credentials {
    Credentials::new("app", "passw0rd").unwrap()
}
