//! This module contains a mid-level abstraction for reading DICOM content
//! sequentially.
//!
//! The rest of the crate is used to obtain DICOM element headers and values.
//! At this level, headers and values are treated as tokens which can be used
//! to form a syntax tree of a full data set.
use crate::error::{Error, InconsistentSequenceEnd, ItemCountExceeded, Result, SequenceDepthExceeded};
use crate::stateful::decode::{DynStatefulDecoder, StatefulDecode};
use dicom_core::dictionary::DataDictionary;
use dicom_core::header::{DataElementHeader, Length, SequenceItemHeader};
use dicom_core::{Tag, VR};
use dicom_dictionary_std::StandardDataDictionary;
use dicom_encoding::text::SpecificCharacterSet;
use dicom_encoding::transfer_syntax::TransferSyntax;
use std::io::Read;
use std::iter::Iterator;

use super::{DataToken, SeqTokenType};

fn is_stateful_decode<T>(_: &T)
where
    T: StatefulDecode,
{
}

/// A reader-specific token representing a sequence or item start.
#[derive(Debug, Copy, Clone, PartialEq)]
struct SeqToken {
    /// Whether it is the start of a sequence or the start of an item.
    typ: SeqTokenType,
    /// The length of the value, as indicated by the starting element,
    /// can be unknown.
    len: Length,
    /// The number of bytes the parser has read until it reached the
    /// beginning of the sequence or item value data.
    base_offset: u64,
}

/// Configurable limits and behavior for a [`DataSetReader`].
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct DataSetReaderOptions {
    /// Maximum sequence nesting depth, counted inclusive of the outermost
    /// sequence. Exceeding it fails the parse.
    pub max_sequence_depth: u32,
    /// Maximum number of sequence or pixel fragment items accepted across
    /// the whole parse. `None` means unbounded.
    pub max_total_items: Option<u64>,
}

impl Default for DataSetReaderOptions {
    fn default() -> Self {
        DataSetReaderOptions {
            max_sequence_depth: 128,
            max_total_items: None,
        }
    }
}

/// A higher-level reader for retrieving structure in a DICOM data set from an
/// arbitrary data source.
#[derive(Debug)]
pub struct DataSetReader<S, D> {
    parser: S,
    dict: D,
    /// whether the reader is expecting an item next (or a sequence delimiter)
    in_sequence: bool,
    /// whether a check for a sequence or item delimitation is pending
    delimiter_check_pending: bool,
    /// a stack of delimiters
    seq_delimiters: Vec<SeqToken>,
    /// fuse the iteration process if true
    hard_break: bool,
    /// last decoded header
    last_header: Option<DataElementHeader>,
    /// current sequence nesting depth
    depth: u32,
    /// number of items read so far across the whole parse
    total_items: u64,
    options: DataSetReaderOptions,
}

impl<'s> DataSetReader<DynStatefulDecoder<'s>, StandardDataDictionary> {
    /// Creates a new iterator with the given random access source,
    /// while considering the given transfer syntax and specific character set.
    pub fn new_with<S: 's>(source: S, ts: &TransferSyntax, cs: SpecificCharacterSet) -> Result<Self>
    where
        S: Read,
    {
        let parser = DynStatefulDecoder::new_with(source, ts, cs, 0)?;

        is_stateful_decode(&parser);

        Ok(DataSetReader {
            parser,
            dict: StandardDataDictionary,
            seq_delimiters: Vec::new(),
            delimiter_check_pending: false,
            in_sequence: false,
            hard_break: false,
            last_header: None,
            depth: 0,
            total_items: 0,
            options: DataSetReaderOptions::default(),
        })
    }
}

impl<'s, D> DataSetReader<DynStatefulDecoder<'s>, D> {
    /// Creates a new iterator with the given random access source and data dictionary,
    /// while considering the given transfer syntax and specific character set.
    pub fn new_with_dictionary<S: 's>(
        source: S,
        dict: D,
        ts: &TransferSyntax,
        cs: SpecificCharacterSet,
    ) -> Result<Self>
    where
        S: Read,
    {
        let parser = DynStatefulDecoder::new_with(source, ts, cs, 0)?;

        is_stateful_decode(&parser);

        Ok(DataSetReader {
            parser,
            dict,
            seq_delimiters: Vec::new(),
            delimiter_check_pending: false,
            in_sequence: false,
            hard_break: false,
            last_header: None,
            depth: 0,
            total_items: 0,
            options: DataSetReaderOptions::default(),
        })
    }
}

impl<S> DataSetReader<S, StandardDataDictionary> {
    /// Create a new iterator with the given parser.
    pub fn new(decoder: S) -> Self {
        DataSetReader {
            parser: decoder,
            dict: StandardDataDictionary,
            seq_delimiters: Vec::new(),
            delimiter_check_pending: false,
            in_sequence: false,
            hard_break: false,
            last_header: None,
            depth: 0,
            total_items: 0,
            options: DataSetReaderOptions::default(),
        }
    }
}

impl<S, D> DataSetReader<S, D> {
    /// Replace this reader's configurable limits and behavior.
    pub fn with_options(mut self, options: DataSetReaderOptions) -> Self {
        self.options = options;
        self
    }
}

impl<S, D> Iterator for DataSetReader<S, D>
where
    S: StatefulDecode,
    D: DataDictionary,
{
    type Item = Result<DataToken>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.hard_break {
            return None;
        }

        // item or sequence delimitation logic for explicit lengths
        if self.delimiter_check_pending {
            match self.update_seq_delimiters() {
                Err(e) => {
                    self.hard_break = true;
                    return Some(Err(e));
                }
                Ok(Some(token)) => return Some(Ok(token)),
                Ok(None) => { /* no-op */ }
            }
        }

        if self.in_sequence {
            match self.parser.decode_item_header() {
                Ok(header) => match header {
                    SequenceItemHeader::Item { len } => {
                        // entered a new item
                        self.total_items += 1;
                        if let Some(max_items) = self.options.max_total_items {
                            if self.total_items > max_items {
                                self.hard_break = true;
                                return Some(
                                    ItemCountExceeded {
                                        count: self.total_items,
                                        max_items,
                                    }
                                    .fail(),
                                );
                            }
                        }

                        self.in_sequence = false;
                        self.seq_delimiters.push(SeqToken {
                            typ: SeqTokenType::Item,
                            len,
                            base_offset: self.parser.position(),
                        });
                        // items can be empty
                        if len == Length(0) {
                            self.delimiter_check_pending = true;
                        }
                        Some(Ok(DataToken::ItemStart { len }))
                    }
                    SequenceItemHeader::ItemDelimiter => {
                        // closed an item
                        self.seq_delimiters.pop();
                        self.in_sequence = true;
                        Some(Ok(DataToken::ItemEnd))
                    }
                    SequenceItemHeader::SequenceDelimiter => {
                        // closed a sequence
                        self.seq_delimiters.pop();
                        self.in_sequence = false;
                        self.depth = self.depth.saturating_sub(1);
                        Some(Ok(DataToken::SequenceEnd))
                    }
                },
                Err(e) => {
                    self.hard_break = true;
                    Some(Err(e.into()))
                }
            }
        } else if self.last_header.is_some() {
            // a plain element header was read, so a value is expected
            let header = self.last_header.unwrap();
            let value = match self.parser.read_value(&header) {
                Ok(v) => v,
                Err(e) => {
                    self.hard_break = true;
                    self.last_header = None;
                    return Some(Err(e.into()));
                }
            };

            self.last_header = None;

            // sequences can end after this token
            self.delimiter_check_pending = true;

            Some(Ok(DataToken::PrimitiveValue(value)))
        } else {
            // a data element header or item delimiter is expected
            match self.parser.decode_header() {
                Ok(DataElementHeader {
                    tag,
                    vr: VR::SQ,
                    len,
                }) => {
                    self.depth += 1;
                    if self.depth > self.options.max_sequence_depth {
                        self.hard_break = true;
                        return Some(
                            SequenceDepthExceeded {
                                depth: self.depth,
                                max_depth: self.options.max_sequence_depth,
                            }
                            .fail(),
                        );
                    }

                    self.in_sequence = true;
                    self.seq_delimiters.push(SeqToken {
                        typ: SeqTokenType::Sequence,
                        len,
                        base_offset: self.parser.position(),
                    });

                    // sequences can end right after they start
                    if len == Length(0) {
                        self.delimiter_check_pending = true;
                    }

                    Some(Ok(DataToken::SequenceStart { tag, len }))
                }
                Ok(DataElementHeader {
                    tag: Tag(0xFFFE, 0xE00D),
                    ..
                }) => {
                    self.in_sequence = true;
                    Some(Ok(DataToken::ItemEnd))
                }
                Ok(header) => {
                    // save it for the next step
                    self.last_header = Some(header);
                    Some(Ok(DataToken::ElementHeader(header)))
                }
                Err(e) => {
                    let e: Error = e.into();
                    self.hard_break = true;
                    if e.is_unexpected_eof() {
                        // the object ended gracefully at an element boundary.
                        // This approach may consume trailing bytes, and will
                        // ignore the possibility of trailing bytes having
                        // already been interpreted as an element header.
                        None
                    } else {
                        Some(Err(e))
                    }
                }
            }
        }
    }
}

impl<S, D> DataSetReader<S, D>
where
    S: StatefulDecode,
{
    fn update_seq_delimiters(&mut self) -> Result<Option<DataToken>> {
        if let Some(sd) = self.seq_delimiters.last() {
            if let Some(len) = sd.len.get() {
                let eos = sd.base_offset + len as u64;
                let bytes_read = self.parser.position();
                if eos == bytes_read {
                    // end of delimiter, as indicated by the element's length
                    let token;
                    match sd.typ {
                        SeqTokenType::Sequence => {
                            self.in_sequence = false;
                            self.depth = self.depth.saturating_sub(1);
                            token = DataToken::SequenceEnd;
                        }
                        SeqTokenType::Item => {
                            self.in_sequence = true;
                            token = DataToken::ItemEnd;
                        }
                    }

                    self.seq_delimiters.pop();
                    return Ok(Some(token));
                } else if eos < bytes_read {
                    return InconsistentSequenceEnd { eos, bytes_read }.fail();
                }
            }
        }
        self.delimiter_check_pending = false;
        Ok(None)
    }
}
