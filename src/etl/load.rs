/// Load Module
///
/// Output sinks for detected mints. Records are written once and then dropped,
/// nothing is persisted.
use anyhow::{Context, Result};
use std::io::Write;

use crate::models::MintEventRecord;

/// Destination for formatted mint records
pub trait EventSink {
    fn emit(&mut self, record: &MintEventRecord) -> Result<()>;
}

/// Writes records through the logger with a banner
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    fn banner(record: &MintEventRecord) -> Result<String> {
        let pretty = serde_json::to_string_pretty(record).context("Failed to serialize mint record")?;
        Ok(format!("=============== new mint detected ! ===============\n{}", pretty))
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, record: &MintEventRecord) -> Result<()> {
        tracing::info!("{}", Self::banner(record)?);
        Ok(())
    }
}

/// Writes one JSON object per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[allow(dead_code)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn emit(&mut self, record: &MintEventRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record).context("Failed to write mint record")?;
        self.writer.write_all(b"\n").context("Failed to write mint record")?;
        self.writer.flush().context("Failed to flush output")?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{DecodedCreateArgs, ResolvedAccounts};

    /// Keeps emitted records in memory
    #[derive(Default)]
    pub(crate) struct VecSink {
        pub(crate) records: Vec<MintEventRecord>,
    }

    impl EventSink for VecSink {
        fn emit(&mut self, record: &MintEventRecord) -> Result<()> {
            self.records.push(record.clone());
            Ok(())
        }
    }

    fn record(signature: &str) -> MintEventRecord {
        MintEventRecord {
            signature: signature.to_string(),
            slot: "7".to_string(),
            accounts: ResolvedAccounts {
                mint: "m".to_string(),
                bonding_curve: "b".to_string(),
                associated_bonding_curve: "a".to_string(),
                user: "u".to_string(),
            },
            args: Some(DecodedCreateArgs {
                name: "n".to_string(),
                symbol: "s".to_string(),
                uri: "".to_string(),
                image: "invalid uri".to_string(),
                creator: "c".to_string(),
            }),
        }
    }

    #[test]
    fn test_json_lines_sink() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.emit(&record("one")).unwrap();
        sink.emit(&record("two")).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: MintEventRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed, record("two"));
    }

    #[test]
    fn test_json_field_order() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.emit(&record("sig")).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.starts_with(r#"{"signature":"sig","slot":"7","mint":"m","bonding_curve":"b""#));
        assert!(output.trim_end().ends_with(r#""image":"invalid uri","creator":"c"}"#));
    }

    #[test]
    fn test_log_sink_banner() {
        let banner = LogSink::banner(&record("sig")).unwrap();
        let (header, body) = banner.split_once('\n').unwrap();

        assert_eq!(header, "=============== new mint detected ! ===============");
        assert!(body.contains("\n  \"mint\": \"m\""));
        let parsed: MintEventRecord = serde_json::from_str(body).unwrap();
        assert_eq!(parsed, record("sig"));
    }
}
