//! A scripted driver transport.

use std::collections::HashMap;

use colfetch::{
    c_type::CDataType,
    codec::{ColumnCodec, encode_to_vec},
    indicator::Indicator,
    transport::{Chunk, DataTransport, FetchStatus},
};
use colfetch_common::{Result, error::Error};

/// A failure injected into a column's fetch sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFault {
    /// The call reports `NoTotal`.
    NoTotal,
    /// The call reports no data.
    NoData,
    /// The call fails at the transport level.
    Driver(String),
    /// The call writes fewer bytes than the indicator implies.
    ShortWrite,
}

#[derive(Debug, Clone)]
struct ColumnScript {
    data: Option<Vec<u8>>,
    offset: usize,
    exhausted: bool,
    /// Fault served in place of the chunk with this index.
    fault: Option<(usize, TransportFault)>,
    served: usize,
}

/// Serves one queued value per column, chunk by chunk.
///
/// Each call for a column copies the next `min(remaining, capacity)` bytes and
/// reports the bytes remaining before the call as its length indicator. Once
/// the value has been delivered in full, further calls report no data.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    columns: HashMap<usize, ColumnScript>,
    calls: usize,
    requests: Vec<(usize, CDataType, usize)>,
}

impl ScriptedTransport {
    pub fn new() -> ScriptedTransport {
        Self::default()
    }

    /// Queues the driver-native encoding of `value` for `column`.
    pub fn value<T: ColumnCodec>(self, column: usize, value: &T) -> ScriptedTransport {
        self.bytes(column, encode_to_vec(value))
    }

    /// Queues raw bytes for `column`.
    pub fn bytes(mut self, column: usize, bytes: Vec<u8>) -> ScriptedTransport {
        self.columns.insert(column, ColumnScript::new(Some(bytes)));
        self
    }

    /// Queues SQL NULL for `column`.
    pub fn null(mut self, column: usize) -> ScriptedTransport {
        self.columns.insert(column, ColumnScript::new(None));
        self
    }

    /// Replaces the `chunk`-th call (zero-based) for `column` with `fault`.
    pub fn fault(mut self, column: usize, chunk: usize, fault: TransportFault) -> ScriptedTransport {
        self.columns
            .entry(column)
            .or_insert_with(|| ColumnScript::new(Some(Vec::new())))
            .fault = Some((chunk, fault));
        self
    }

    /// Restarts every queued value from its first byte.
    pub fn rewind(&mut self) {
        for script in self.columns.values_mut() {
            script.offset = 0;
            script.exhausted = false;
            script.served = 0;
        }
    }

    /// Total number of `get_data` calls.
    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn calls_for(&self, column: usize) -> usize {
        self.requests.iter().filter(|(c, _, _)| *c == column).count()
    }

    /// `(column, c_type, capacity)` of every call, in order.
    pub fn requests(&self) -> &[(usize, CDataType, usize)] {
        &self.requests
    }
}

impl ColumnScript {
    fn new(data: Option<Vec<u8>>) -> ColumnScript {
        ColumnScript {
            data,
            offset: 0,
            exhausted: false,
            fault: None,
            served: 0,
        }
    }

    fn next(&mut self, target: &mut [u8]) -> Result<FetchStatus> {
        let index = self.served;
        self.served += 1;

        if let Some((at, fault)) = &self.fault {
            if *at == index {
                return match fault {
                    TransportFault::NoTotal => {
                        let n = target.len();
                        Ok(FetchStatus::Data(Chunk {
                            written: n,
                            indicator: Indicator::NoTotal,
                        }))
                    }
                    TransportFault::NoData => Ok(FetchStatus::NoData),
                    TransportFault::Driver(message) => {
                        Err(Error::driver("SQLGetData", message.clone()))
                    }
                    TransportFault::ShortWrite => {
                        let remaining = self.data.as_ref().map_or(0, |d| d.len() - self.offset);
                        Ok(FetchStatus::Data(Chunk {
                            written: remaining.min(target.len()).saturating_sub(1),
                            indicator: Indicator::Length(remaining),
                        }))
                    }
                };
            }
        }

        let Some(data) = &self.data else {
            return Ok(FetchStatus::null());
        };
        if self.exhausted {
            return Ok(FetchStatus::NoData);
        }

        let remaining = data.len() - self.offset;
        let n = remaining.min(target.len());
        target[..n].copy_from_slice(&data[self.offset..self.offset + n]);
        self.offset += n;
        self.exhausted = remaining <= target.len();
        Ok(FetchStatus::data(remaining, target.len()))
    }
}

impl DataTransport for ScriptedTransport {
    fn get_data(
        &mut self,
        column: usize,
        c_type: CDataType,
        target: &mut [u8],
    ) -> Result<FetchStatus> {
        self.calls += 1;
        self.requests.push((column, c_type, target.len()));
        let script = self.columns.get_mut(&column).ok_or_else(|| {
            Error::driver(
                format!("get_data(column {column})"),
                "invalid descriptor index",
            )
        })?;
        let status = script.next(target)?;
        log::trace!("scripted column {column} ({c_type}): {status:?}");
        Ok(status)
    }
}
