use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::{Arc, RwLock};

use super::EngineMessage;
use crate::core::Engine;

/// MessageBus carries trigger and volume messages from the UI to the
/// engine. Messages are applied strictly in arrival order, which keeps
/// two rapid triggers on distinct notes starting in call order.
pub struct MessageBus {
    sender: Sender<EngineMessage>,
    receiver: Receiver<EngineMessage>,
    engine_ref: Arc<RwLock<Engine>>,
}

impl MessageBus {
    /// Create a new message bus connected to the engine
    pub fn new(engine: Arc<RwLock<Engine>>) -> Self {
        let (sender, receiver) = unbounded();

        MessageBus {
            sender,
            receiver,
            engine_ref: engine,
        }
    }

    /// Get a sender that can be cloned and handed to UI components
    pub fn sender(&self) -> Sender<EngineMessage> {
        self.sender.clone()
    }

    /// Drain all pending messages into the engine
    pub fn process_messages(&self) {
        while let Ok(msg) = self.receiver.try_recv() {
            self.handle_message(msg);
        }
    }

    fn handle_message(&self, msg: EngineMessage) {
        match msg {
            EngineMessage::Trigger { frequency } => {
                if let Ok(mut engine) = self.engine_ref.write() {
                    engine.trigger(frequency);
                }
            }
            EngineMessage::SetVolume(volume) => {
                if let Ok(mut engine) = self.engine_ref.write() {
                    engine.set_volume(volume);
                }
            }
        }
    }

    pub fn send(&self, msg: EngineMessage) -> Result<(), crossbeam_channel::SendError<EngineMessage>> {
        self.sender.send(msg)
    }
}
