//! Lock-free control queue between the control side and the audio thread.
//!
//! Single producer, single consumer, bounded. The audio thread drains it once
//! per block; the producer never blocks and reports a full queue instead.

use crate::{Error, ExpressionKind, ParamId, Program, Result, TransitionConfig};
use ringbuf::{traits::*, HeapCons, HeapProd, HeapRb};

/// A discrete control event for the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlMessage {
    StartSounding,
    StopSounding,
    SetParameter { id: ParamId, value: f32 },
    SetExpression(ExpressionKind),
    ConfigureTransition(TransitionConfig),
}

/// Producer side: push control messages from any non-audio thread.
pub struct ControlProducer {
    producer: HeapProd<ControlMessage>,
}

impl ControlProducer {
    #[inline]
    pub fn push(&mut self, message: ControlMessage) -> Result<()> {
        self.producer
            .try_push(message)
            .map_err(|_| Error::QueueFull)?;
        tracing::trace!("Queued control message {:?}", message);
        Ok(())
    }

    /// Push every message needed to apply `program`, or none of them.
    ///
    /// Transition overrides go first so the expression request already uses
    /// them; the expression target goes last so it wins over enable toggles
    /// in the parameter map.
    pub fn push_program(&mut self, program: &Program) -> Result<()> {
        if self.producer.vacant_len() < program.message_count() {
            return Err(Error::QueueFull);
        }

        self.push(ControlMessage::ConfigureTransition(program.transition))?;
        for (&id, &value) in &program.parameters {
            self.push(ControlMessage::SetParameter { id, value })?;
        }
        self.push(ControlMessage::SetExpression(program.expression))
    }

    #[inline]
    pub fn vacant_len(&self) -> usize {
        self.producer.vacant_len()
    }
}

/// Consumer side: drained by the audio thread.
pub struct ControlConsumer {
    consumer: HeapCons<ControlMessage>,
}

impl ControlConsumer {
    #[inline]
    pub fn pop(&mut self) -> Option<ControlMessage> {
        self.consumer.try_pop()
    }

    #[inline]
    pub fn has_pending(&self) -> bool {
        !self.consumer.is_empty()
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.consumer.occupied_len()
    }
}

/// Create a bounded control queue. `capacity` must be at least 1.
pub fn control_channel(capacity: usize) -> Result<(ControlProducer, ControlConsumer)> {
    if capacity == 0 {
        return Err(Error::InvalidConfig(
            "control queue capacity must be at least 1".into(),
        ));
    }
    let rb = HeapRb::new(capacity);
    let (producer, consumer) = rb.split();
    Ok((ControlProducer { producer }, ControlConsumer { consumer }))
}
