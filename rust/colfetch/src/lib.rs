//! Typed column extraction from driver result buffers.
//!
//! An [`Extractor`](extractor::Extractor) turns the raw data a database driver
//! produces for a result-set column into Rust values. Data reaches it in one of
//! two ways, fixed per statement execution:
//!
//! - **Bound**: the driver has already written all rows into buffers owned by
//!   the statement's [`BufferRegistry`](registry::BufferRegistry). Scalars read
//!   row 0; containers (`Vec`, `VecDeque`, `LinkedList`) read every row and come
//!   with a per-row [`NullMask`](null_mask::NullMask).
//! - **Manual**: each scalar is pulled through the
//!   [`DataTransport`](transport::DataTransport), in chunks for text and binary
//!   data, subject to the registry's maximum field size.
//!
//! Per-type decoding is captured once by [`ColumnCodec`](codec::ColumnCodec);
//! chunking, striding and NULL handling are shared by every type.

pub mod buffer;
pub mod bulk;
pub mod c_type;
pub mod chunked;
pub mod codec;
pub mod data_type;
pub mod extract;
pub mod extractor;
pub mod indicator;
pub mod native;
pub mod null_mask;
pub mod options;
pub mod registry;
pub mod transport;
pub mod value;
pub mod vectorized;

pub use bulk::BulkExtraction;
pub use codec::{Blob, ColumnCodec};
pub use data_type::DataType;
pub use extract::{BulkElement, Extract, RowContainer};
pub use extractor::{BulkColumn, Extracted, Extractor, check_data_size};
pub use indicator::Indicator;
pub use null_mask::NullMask;
pub use options::ExtractorOptions;
pub use registry::{BufferRegistry, ExtractionMode};
pub use transport::{DataTransport, FetchStatus};
pub use value::{DynamicValue, Value};

pub use colfetch_common::{Result, error::Error, error::ErrorKind};
pub use colfetch_datetime::{Date, DateTime, Time};
