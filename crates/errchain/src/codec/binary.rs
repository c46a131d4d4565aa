//! Length-prefixed binary encoding of a chain.
//!
//! Every node is written as, in order:
//!
//! 1. `kind`: zig-zag signed varint
//! 2. `location`: unsigned varint byte length, then UTF-8 bytes
//! 3. `message`: unsigned varint byte length, then UTF-8 bytes
//!
//! followed directly by the encoding of its cause. There is no terminator:
//! the chain ends where the buffer ends.

use super::varint::{self, VarintError};
use crate::{Error, Kind, Location};
use std::fmt;
use strum::{Display, IntoStaticStr};

/// Encode the whole chain.
pub fn encode(err: &Error) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(err));
    encode_into(err, &mut out);
    out
}

/// Append the encoding of the whole chain to `out`.
pub fn encode_into(err: &Error, out: &mut Vec<u8>) {
    for node in err.chain() {
        varint::put_varint(out, node.kind().code());
        put_bytes(out, node.location().as_str().as_bytes());
        put_bytes(out, node.message().as_bytes());
    }
}

/// Exact size of `encode(err)`.
pub fn encoded_len(err: &Error) -> usize {
    err.chain()
        .map(|node| {
            varint::varint_len(node.kind().code())
                + prefixed_len(node.location().as_str().len())
                + prefixed_len(node.message().len())
        })
        .sum()
}

fn put_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    varint::put_uvarint(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

fn prefixed_len(len: usize) -> usize {
    varint::uvarint_len(len as u64) + len
}

/// Decode a chain, recovering from malformed input.
///
/// Never fails. Each problem is logged with `tracing::warn!`; a field that
/// cannot be framed is left empty and nothing after it is read.
pub fn decode(buf: &[u8]) -> Error {
    decode_with(buf, &DecodeOption::default()).unwrap_or_else(|err| {
        tracing::warn!("lenient decode gave up: {}", err);
        Error::default()
    })
}

/// Decode a chain with explicit options.
///
/// Only fails when `option.strict` is set.
#[tracing::instrument(skip_all, fields(len = buf.len(), strict = option.strict))]
pub fn decode_with(buf: &[u8], option: &DecodeOption) -> Result<Error, DecodeError> {
    let decoder = Decoder { option };
    let mut reader = Reader::new(buf);
    let mut links = Vec::new();

    loop {
        let link = decoder.link(&mut reader, links.len())?;
        links.push(link);
        if reader.is_empty() {
            break;
        }
        if option.max_depth.is_some_and(|max| links.len() >= max) {
            decoder.recover(DecodeError::new(
                DecodeErrorKind::DepthExceeded,
                Field::Kind,
                reader.offset,
                links.len(),
            ))?;
            break;
        }
    }

    tracing::trace!("decoded {} links from {} bytes", links.len(), buf.len());

    let mut cause = None;
    for link in links.into_iter().rev() {
        cause = Some(Error::from_link(
            link.message,
            link.kind,
            Location::from(link.location),
            cause,
        ));
    }
    Ok(cause.unwrap_or_default())
}

/// Options for [`decode_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOption {
    /// Return the first problem instead of logging it and continuing.
    pub strict: bool,
    /// Stop after this many nodes. The outermost node is always decoded.
    pub max_depth: Option<usize>,
}

impl DecodeOption {
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// The field being read when decoding went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
pub enum Field {
    Kind,
    Location,
    Message,
}

/// What went wrong while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum DecodeErrorKind {
    /// Input ended inside a varint
    UnexpectedEof,

    /// Varint longer than 64 bits
    VarintOverflow,

    /// Declared string length exceeds the remaining bytes
    LengthOverrun,

    /// String bytes are not valid UTF-8
    InvalidUtf8,

    /// More nodes than `DecodeOption::max_depth` allows
    DepthExceeded,
}

impl From<VarintError> for DecodeErrorKind {
    fn from(err: VarintError) -> Self {
        match err {
            VarintError::Truncated => DecodeErrorKind::UnexpectedEof,
            VarintError::Overflow => DecodeErrorKind::VarintOverflow,
        }
    }
}

/// A problem found in binary input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    field: Field,
    offset: usize,
    depth: usize,
}

impl DecodeError {
    fn new(kind: DecodeErrorKind, field: Field, offset: usize, depth: usize) -> Self {
        Self {
            kind,
            field,
            offset,
            depth,
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    /// Get the field that failed
    pub fn field(&self) -> Field {
        self.field
    }

    /// Byte offset where the failing field starts.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Index of the node being decoded, 0 for the outermost.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {} at offset {} (depth {})",
            self.kind, self.field, self.offset, self.depth
        )
    }
}

impl std::error::Error for DecodeError {}

#[derive(Default)]
struct Link {
    kind: Kind,
    location: String,
    message: String,
}

struct Reader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    fn is_empty(&self) -> bool {
        self.offset >= self.buf.len()
    }

    fn rest(&self) -> &'a [u8] {
        &self.buf[self.offset..]
    }

    fn drain(&mut self) {
        self.offset = self.buf.len();
    }

    fn varint(&mut self) -> Result<i64, DecodeErrorKind> {
        let (value, len) = varint::read_varint(self.rest())?;
        self.offset += len;
        Ok(value)
    }

    fn prefixed(&mut self) -> Result<&'a [u8], DecodeErrorKind> {
        let (len, prefix) = varint::read_uvarint(self.rest())?;
        let start = self.offset + prefix;
        let available = self.buf.len() - start;
        if len > available as u64 {
            return Err(DecodeErrorKind::LengthOverrun);
        }
        let end = start + len as usize;
        self.offset = end;
        Ok(&self.buf[start..end])
    }
}

struct Decoder<'o> {
    option: &'o DecodeOption,
}

impl Decoder<'_> {
    fn recover(&self, err: DecodeError) -> Result<(), DecodeError> {
        if self.option.strict {
            return Err(err);
        }
        tracing::warn!("lenient decode: {}", err);
        Ok(())
    }

    /// Read one node's fields. Stops at the first field that cannot be framed.
    fn link(&self, reader: &mut Reader<'_>, depth: usize) -> Result<Link, DecodeError> {
        let mut link = Link::default();

        let offset = reader.offset;
        match reader.varint() {
            Ok(code) => link.kind = Kind::new(code),
            Err(kind) => {
                reader.drain();
                self.recover(DecodeError::new(kind, Field::Kind, offset, depth))?;
                return Ok(link);
            }
        }

        let Some(location) = self.text(reader, Field::Location, depth)? else {
            return Ok(link);
        };
        link.location = location;

        if let Some(message) = self.text(reader, Field::Message, depth)? {
            link.message = message;
        }
        Ok(link)
    }

    fn text(
        &self,
        reader: &mut Reader<'_>,
        field: Field,
        depth: usize,
    ) -> Result<Option<String>, DecodeError> {
        let offset = reader.offset;
        let bytes = match reader.prefixed() {
            Ok(bytes) => bytes,
            Err(kind) => {
                reader.drain();
                self.recover(DecodeError::new(kind, field, offset, depth))?;
                return Ok(None);
            }
        };

        match std::str::from_utf8(bytes) {
            Ok(text) => Ok(Some(text.to_owned())),
            Err(_) => {
                self.recover(DecodeError::new(
                    DecodeErrorKind::InvalidUtf8,
                    field,
                    offset,
                    depth,
                ))?;
                Ok(Some(String::from_utf8_lossy(bytes).into_owned()))
            }
        }
    }
}
