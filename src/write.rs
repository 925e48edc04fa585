use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("Could not create output file at '{}'", path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where [`write_files_with_missing()`](crate::write_files_with_missing()) put its output.
#[derive(Debug)]
pub struct Outcome {
    pub matched: PathBuf,
    pub missing: PathBuf,
}

/// Return the path of the file holding the unmatched rows that accompanies `output`.
///
/// `out/salaries.csv` turns into `out/salaries_missing.csv`.
pub fn missing_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = output
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".into());
    output.with_file_name(format!("{stem}_missing.{extension}"))
}

pub(crate) mod function {
    use crate::reconcile::{MatchedRecord, MissingRecord};
    use crate::write::{missing_path, Error, Outcome};
    use std::path::Path;

    /// Write `matched` to `output` and `missing` right next to it, see [`missing_path()`].
    pub fn write_files_with_missing(
        matched: &[MatchedRecord],
        missing: &[MissingRecord],
        output: &Path,
    ) -> Result<Outcome, Error> {
        let missing_output = missing_path(output);
        write_matched(matched, create(output)?)?;
        log::info!("Wrote {} matched records to '{}'", matched.len(), output.display());
        write_missing(missing, create(&missing_output)?)?;
        log::info!(
            "Wrote {} unmatched records to '{}'",
            missing.len(),
            missing_output.display()
        );
        Ok(Outcome {
            matched: output.to_owned(),
            missing: missing_output,
        })
    }

    pub fn write_matched(records: &[MatchedRecord], out: impl std::io::Write) -> Result<(), Error> {
        write_records(MatchedRecord::HEADERS, records, out)
    }

    pub fn write_missing(records: &[MissingRecord], out: impl std::io::Write) -> Result<(), Error> {
        write_records(MissingRecord::HEADERS, records, out)
    }

    /// The header line is written even if there are no `records`.
    fn write_records<T: serde::Serialize>(
        headers: &[&str],
        records: &[T],
        out: impl std::io::Write,
    ) -> Result<(), Error> {
        let mut out = csv::WriterBuilder::new()
            .delimiter(b',')
            .has_headers(false)
            .from_writer(out);
        out.write_record(headers)?;
        for record in records {
            out.serialize(record)?;
        }
        out.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    fn create(path: &Path) -> Result<std::io::BufWriter<std::fs::File>, Error> {
        std::fs::File::create(path)
            .map(std::io::BufWriter::new)
            .map_err(|err| Error::Create {
                path: path.to_owned(),
                source: err,
            })
    }
}
