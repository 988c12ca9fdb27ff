//! Result persistence.

use crate::error::Result;
use crate::scan::ScanResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Sink for a completed scan.
///
/// Implementations receive the read-only result and the luminosity scale to
/// apply to every count and total they persist. The engine never scales its
/// own counts, and never branches on output format.
pub trait ResultWriter {
    fn write(&mut self, result: &ScanResult, luminosity: f64) -> Result<()>;
}

/// Writes a whitespace-separated text table.
///
/// Layout:
///
/// ```text
/// # totals: sig=40 bkg=1200
/// cutpoint pt eta_low eta_high sig bkg sig_fraction bkg_fraction
/// 0 15 -2 2 31 420 0.775 0.35
/// ```
///
/// Counts and totals are multiplied by the luminosity; thresholds and
/// fractions are not.
#[derive(Debug)]
pub struct TextResultWriter<W: Write> {
    out: W,
}

impl<W: Write> TextResultWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TextResultWriter<BufWriter<File>> {
    /// Creates (or truncates) `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> ResultWriter for TextResultWriter<W> {
    fn write(&mut self, result: &ScanResult, luminosity: f64) -> Result<()> {
        let names = result.dataset_names();

        write!(self.out, "# totals:")?;
        for (name, total) in names.iter().zip(result.totals()) {
            write!(self.out, " {name}={}", total * luminosity)?;
        }
        writeln!(self.out)?;

        write!(self.out, "cutpoint")?;
        for label in result.cut_value_labels().iter().chain(names) {
            write!(self.out, " {label}")?;
        }
        for name in names {
            write!(self.out, " {name}_fraction")?;
        }
        writeln!(self.out)?;

        for c in 0..result.num_cutpoints() {
            write!(self.out, "{c}")?;
            for value in result.cuts(c)? {
                write!(self.out, " {value}")?;
            }
            for d in 0..result.num_datasets() {
                write!(self.out, " {}", result.count(d, c)? * luminosity)?;
            }
            for d in 0..result.num_datasets() {
                write!(self.out, " {}", result.fraction(d, c)?)?;
            }
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::CutTable;
    use crate::data::Table;
    use crate::scan::{RgsEngine, ScanConfig};

    #[test]
    fn test_text_layout_and_scaling() {
        let cuts = Table::new(vec!["pt"], vec![vec![15.0], vec![25.0]]).unwrap();
        let mut engine =
            RgsEngine::new(CutTable::new(cuts).unwrap()).with_config(ScanConfig::reference());
        let events = Table::new(
            vec!["pt"],
            vec![vec![10.0], vec![20.0], vec![30.0], vec![40.0]],
        )
        .unwrap();
        engine.add("sig", &events, None).unwrap();
        engine.add("bkg", &events.slice(crate::data::RowRange::new(2, None)), None).unwrap();
        engine.run(&["pt"], &[">"]).unwrap();

        let mut writer = TextResultWriter::new(Vec::new());
        engine.save(&mut writer, 2.0).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "# totals: sig=8 bkg=4",
                "cutpoint pt sig bkg sig_fraction bkg_fraction",
                "0 15 6 4 0.75 1",
                "1 25 4 4 0.5 1",
            ]
        );
        // stored counts are untouched
        assert_eq!(engine.count(0, 0).unwrap(), 3.0);
    }
}
