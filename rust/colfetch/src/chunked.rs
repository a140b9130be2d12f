//! Manual-mode fetching: streams a value from the driver in bounded chunks.

use colfetch_common::{Result, error::Error};

use crate::{
    c_type::CDataType,
    indicator::Indicator,
    transport::{DataTransport, FetchStatus},
};

/// Per-call state of one manual extraction.
#[derive(Clone, Debug)]
pub struct FetchContext {
    column: usize,
    c_type: CDataType,
    indicator: Option<Indicator>,
    total: usize,
    calls: usize,
}

impl FetchContext {
    pub fn new(column: usize, c_type: CDataType) -> FetchContext {
        FetchContext {
            column,
            c_type,
            indicator: None,
            total: 0,
            calls: 0,
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Final indicator: `Null`, or `Length` of the whole value. `None` until
    /// the fetch completes.
    pub fn indicator(&self) -> Option<Indicator> {
        self.indicator
    }

    /// Bytes accumulated so far.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of `get_data` calls issued.
    pub fn calls(&self) -> usize {
        self.calls
    }

    fn get_data<D>(&mut self, transport: &mut D, target: &mut [u8]) -> Result<FetchStatus>
    where
        D: DataTransport + ?Sized,
    {
        self.calls += 1;
        let status = transport.get_data(self.column, self.c_type, target)?;
        if let FetchStatus::Data(chunk) = status {
            if chunk.written > target.len() {
                return Err(Error::driver(
                    format!("get_data(column {})", self.column),
                    format!(
                        "driver reported {} bytes written into a {}-byte buffer",
                        chunk.written,
                        target.len()
                    ),
                ));
            }
        }
        Ok(status)
    }

    fn complete(&mut self, indicator: Indicator) {
        self.indicator = Some(indicator);
    }
}

/// Streams a variable-length value in chunks of `chunk_size` bytes.
///
/// Returns `None` for SQL NULL. The running total is checked against
/// `max_size` after every chunk; a value of `S > 0` bytes takes
/// `ceil(S / chunk_size)` calls.
pub fn stream_value<D>(
    ctx: &mut FetchContext,
    transport: &mut D,
    chunk_size: usize,
    max_size: usize,
) -> Result<Option<Vec<u8>>>
where
    D: DataTransport + ?Sized,
{
    let mut chunk = vec![0u8; chunk_size];
    let mut value = Vec::new();

    loop {
        let status = ctx.get_data(transport, &mut chunk)?;
        let FetchStatus::Data(fetched) = status else {
            break;
        };
        log::trace!(
            "column {}: chunk {} reported {:?}, wrote {} bytes",
            ctx.column,
            ctx.calls,
            fetched.indicator,
            fetched.written
        );

        let remaining = match fetched.indicator {
            Indicator::Null => {
                log::debug!("column {}: NULL", ctx.column);
                ctx.complete(Indicator::Null);
                return Ok(None);
            }
            Indicator::NoTotal => return Err(Error::unknown_length(ctx.column)),
            Indicator::Length(0) => break,
            Indicator::Length(remaining) => remaining,
        };

        let take = remaining.min(chunk_size);
        if fetched.written != take {
            return Err(Error::driver(
                format!("get_data(column {})", ctx.column),
                format!(
                    "driver wrote {} bytes, expected {take} of {remaining} remaining",
                    fetched.written
                ),
            ));
        }

        ctx.total += take;
        crate::extractor::check_data_size(ctx.total, max_size)?;
        value.extend_from_slice(&chunk[..take]);

        if remaining <= chunk_size {
            break;
        }
    }

    log::debug!(
        "column {}: fetched {} bytes in {} calls",
        ctx.column,
        ctx.total,
        ctx.calls
    );
    ctx.complete(Indicator::Length(ctx.total));
    Ok(Some(value))
}

/// Fetches a fixed-size value with a single call into a buffer of exactly `width` bytes.
///
/// Returns `None` for SQL NULL.
pub fn fetch_fixed<D>(
    ctx: &mut FetchContext,
    transport: &mut D,
    width: usize,
) -> Result<Option<Vec<u8>>>
where
    D: DataTransport + ?Sized,
{
    let mut buf = vec![0u8; width];
    let status = ctx.get_data(transport, &mut buf)?;
    let FetchStatus::Data(fetched) = status else {
        return Err(Error::driver(
            format!("get_data(column {})", ctx.column),
            "no data returned for a fixed-size value",
        ));
    };

    match fetched.indicator {
        Indicator::Null => {
            log::debug!("column {}: NULL", ctx.column);
            ctx.complete(Indicator::Null);
            Ok(None)
        }
        Indicator::NoTotal => Err(Error::unknown_length(ctx.column)),
        Indicator::Length(_) if fetched.written != width => Err(Error::driver(
            format!("get_data(column {})", ctx.column),
            format!(
                "driver wrote {} bytes for a {width}-byte {} value",
                fetched.written, ctx.c_type
            ),
        )),
        Indicator::Length(_) => {
            ctx.total = width;
            ctx.complete(Indicator::Length(width));
            Ok(Some(buf))
        }
    }
}
