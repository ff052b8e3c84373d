//! Rendering of samples and catalogue listings.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use isotope_core::catalogue::Catalogue;
use isotope_core::constants::LN_2;
use isotope_core::types::Sample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// One line per sample, aligned for terminals.
pub fn sample_line(s: &Sample) -> String {
    format!(
        "{:>10.4} h  {:>12.4} MBq  {:>7.2}%  γ = {:.4}",
        s.elapsed_hours,
        s.activity_mbq,
        s.percent_remaining(),
        s.gamma
    )
}

pub fn write_samples(out: &mut dyn Write, samples: &[Sample], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            writeln!(out, "{:>12}  {:>16}  {:>8}  {}", "time", "activity", "remain", "gamma")?;
            for s in samples {
                writeln!(out, "{}", sample_line(s))?;
            }
        }
        OutputFormat::Csv => {
            writeln!(out, "elapsed_hours,activity_mbq,gamma,percent_remaining")?;
            for s in samples {
                writeln!(
                    out,
                    "{},{},{},{}",
                    s.elapsed_hours,
                    s.activity_mbq,
                    s.gamma,
                    s.percent_remaining()
                )?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, samples)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn write_catalogue(out: &mut dyn Write, catalogue: &Catalogue) -> Result<()> {
    writeln!(
        out,
        "{:<16} {:>10} {:>12}  {:<8} {}",
        "name", "t½ (h)", "λ (1/h)", "color", "application"
    )?;
    for n in catalogue.iter() {
        writeln!(
            out,
            "{:<16} {:>10.2} {:>12.6}  {:<8} {}",
            n.name(),
            n.half_life(),
            LN_2 / n.half_life(),
            n.display_color(),
            n.application()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Sample> {
        vec![
            Sample {
                elapsed_hours: 0.0,
                activity_mbq: 100.0,
                gamma: 1.0,
            },
            Sample {
                elapsed_hours: 1.83,
                activity_mbq: 50.0,
                gamma: 0.5,
            },
        ]
    }

    fn render(format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_samples(&mut buf, &samples(), format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn csv_has_header_and_rows() {
        let csv = render(OutputFormat::Csv);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "elapsed_hours,activity_mbq,gamma,percent_remaining");
        assert_eq!(lines[2], "1.83,50,0.5,50");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn json_parses_back() {
        let json = render(OutputFormat::Json);
        let back: Vec<Sample> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, samples());
    }

    #[test]
    fn table_line_format() {
        assert_eq!(
            sample_line(&samples()[1]),
            "    1.8300 h       50.0000 MBq    50.00%  γ = 0.5000"
        );
        assert_eq!(render(OutputFormat::Table).lines().count(), 3);
    }

    #[test]
    fn catalogue_listing_has_every_entry() {
        let mut buf = Vec::new();
        write_catalogue(&mut buf, &Catalogue::builtin()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 6);
        assert!(text.contains("Yodo-131"));
        assert!(text.contains("0.115332"));
    }
}
