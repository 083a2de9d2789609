//! Output records and the sink they are delivered to.

use std::fmt;

use crate::event::Timestamp;

/// Annotation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// A control register write and its decoded meaning.
    Register,
    /// A digit row write and its decoded display content.
    Digit,
    /// A write to an address that is not a register.
    Invalid,
    /// The position in the chain that received the write.
    Device,
}

impl AnnotationKind {
    /// Short lower-case identifier (`register`, `digit`, `invalid`, `device`).
    pub fn id(self) -> &'static str {
        match self {
            AnnotationKind::Register => "register",
            AnnotationKind::Digit => "digit",
            AnnotationKind::Invalid => "invalid",
            AnnotationKind::Device => "device",
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One annotation over a span of the capture.
///
/// `texts` holds alternative renderings ordered from the most to the least
/// verbose; a viewer picks the longest one that fits. It is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub start: Timestamp,
    pub end: Timestamp,
    pub texts: Vec<String>,
}

impl Annotation {
    pub fn new(kind: AnnotationKind, start: Timestamp, end: Timestamp, texts: Vec<String>) -> Self {
        Self {
            kind,
            start,
            end,
            texts,
        }
    }

    /// The most verbose text.
    pub fn text(&self) -> &str {
        self.texts.first().map(String::as_str).unwrap_or("")
    }
}

/// Destination for annotations produced by the decoder.
pub trait AnnotationSink {
    /// Deliver one annotation.
    fn emit(&mut self, annotation: Annotation);
}

impl AnnotationSink for Vec<Annotation> {
    fn emit(&mut self, annotation: Annotation) {
        self.push(annotation);
    }
}

/// Adapter that turns a closure into an [`AnnotationSink`].
///
/// # Examples
///
/// ```
/// use max72xx_chain::{Annotation, ChainDecoder, FnSink, TransferEvent};
///
/// let mut decoder = ChainDecoder::default();
/// let mut count = 0;
/// let mut sink = FnSink(|_annotation: Annotation| count += 1);
/// decoder.decode(TransferEvent::select(true, 0), &mut sink);
/// decoder.decode(TransferEvent::data(0x0C, 1, 8), &mut sink);
/// decoder.decode(TransferEvent::data(0x01, 9, 16), &mut sink);
/// drop(sink);
/// assert_eq!(count, 2);
/// ```
pub struct FnSink<F>(pub F);

impl<F: FnMut(Annotation)> AnnotationSink for FnSink<F> {
    fn emit(&mut self, annotation: Annotation) {
        (self.0)(annotation);
    }
}
