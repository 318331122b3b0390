//! Multipart framing
//!
//! Message format: [topic: 3 ASCII bytes, payload]. Every frame except the
//! last is sent with the "more" flag so subscribers receive the message as
//! one unit.

use super::transport::TransportError;

/// Notification topic, sent as the first frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Transaction,
    Block,
}

impl Topic {
    pub const fn tag(self) -> &'static [u8; 3] {
        match self {
            Topic::Transaction => b"TXN",
            Topic::Block => b"BLK",
        }
    }

    pub fn from_tag(tag: &[u8]) -> Option<Topic> {
        match tag {
            b"TXN" => Some(Topic::Transaction),
            b"BLK" => Some(Topic::Block),
            _ => None,
        }
    }
}

/// Destination for message frames
pub trait FrameSink {
    /// Send one frame; `more` is true for every frame but the last
    fn send_frame(&self, bytes: &[u8], more: bool) -> Result<(), TransportError>;
}

/// Send `frames` as one multipart message
///
/// The last frame is the terminal frame. Stops at the first failed frame;
/// the remaining frames of the message are not sent.
pub fn send_frames(sink: &dyn FrameSink, frames: &[&[u8]]) -> Result<(), TransportError> {
    let last = frames.len().saturating_sub(1);
    for (i, frame) in frames.iter().enumerate() {
        sink.send_frame(frame, i != last)?;
    }
    Ok(())
}

/// Send a [topic, payload] notification
pub fn emit_multipart(
    sink: &dyn FrameSink,
    topic: Topic,
    payload: &[u8],
) -> Result<(), TransportError> {
    let frames: [&[u8]; 2] = [topic.tag(), payload];
    send_frames(sink, &frames)
}

/// Split a received message into its topic and payload
///
/// Returns `None` unless the message has exactly two frames and a known topic.
pub fn split_notification<B: AsRef<[u8]>>(frames: &[B]) -> Option<(Topic, &[u8])> {
    match frames {
        [topic, payload] => Some((Topic::from_tag(topic.as_ref())?, payload.as_ref())),
        _ => None,
    }
}


#[cfg(test)]
mod tests {
    use super::test_sink::RecordingSink;
    use super::*;

    #[test]
    fn test_topic_tags() {
        assert_eq!(Topic::Transaction.tag(), b"TXN");
        assert_eq!(Topic::Block.tag(), b"BLK");
        assert_eq!(Topic::from_tag(b"TXN"), Some(Topic::Transaction));
        assert_eq!(Topic::from_tag(b"BLK"), Some(Topic::Block));
        assert_eq!(Topic::from_tag(b"hashblock"), None);
    }

    #[test]
    fn test_emit_multipart_flags() {
        let sink = RecordingSink::default();
        emit_multipart(&sink, Topic::Block, &[7u8; 32]).unwrap();

        let frames = sink.frames.borrow();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], (b"BLK".to_vec(), true));
        assert_eq!(frames[1], (vec![7u8; 32], false));
    }

    #[test]
    fn test_failed_topic_skips_payload() {
        let sink = RecordingSink::failing_at(0);
        assert!(emit_multipart(&sink, Topic::Transaction, b"payload").is_err());
        assert_eq!(sink.attempts(), 1);
        assert!(sink.frames.borrow().is_empty());
    }

    #[test]
    fn test_failed_payload_leaves_message_incomplete() {
        let sink = RecordingSink::failing_at(1);
        let err = emit_multipart(&sink, Topic::Block, &[1u8; 32]).unwrap_err();
        assert!(matches!(err, TransportError::NotBound));
        assert_eq!(sink.attempts(), 2);
        assert_eq!(*sink.frames.borrow(), vec![(b"BLK".to_vec(), true)]);
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_send_frames_marks_only_last_final() {
        let sink = RecordingSink::default();
        let frames: [&[u8]; 3] = [b"a", b"b", b"c"];
        send_frames(&sink, &frames).unwrap();

        let flags: Vec<bool> = sink.frames.borrow().iter().map(|(_, more)| *more).collect();
        assert_eq!(flags, vec![true, true, false]);
        assert_eq!(sink.messages().len(), 1);
    }

    #[test]
    fn test_send_frames_empty_is_noop() {
        let sink = RecordingSink::default();
        send_frames(&sink, &[]).unwrap();
        assert_eq!(sink.attempts(), 0);
    }

    #[test]
    fn test_split_notification() {
        let message = vec![b"TXN".to_vec(), vec![0xaa; 32]];
        let (topic, payload) = split_notification(&message).unwrap();
        assert_eq!(topic, Topic::Transaction);
        assert_eq!(payload, &[0xaa; 32][..]);

        assert!(split_notification(&[b"TXN".to_vec()]).is_none());
        assert!(split_notification(&[b"XYZ".to_vec(), vec![]]).is_none());
    }
}
