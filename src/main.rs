use anyhow::Context;
use clap::Parser;
use std::path::Path;

mod options {
    use std::path::PathBuf;

    #[derive(Debug, clap::Parser)]
    #[clap(
        name = "salary-match",
        about = "Match a salary disclosure extract to an officer identity roster by name"
    )]
    pub struct Args {
        /// A RON file with `Options` overriding column names or the year of the salary data.
        #[clap(long)]
        pub options: Option<PathBuf>,
        /// The CSV file with the identity roster, with columns `id`, `first name` and `last name`.
        #[clap(value_parser = existing_path)]
        pub id_path: PathBuf,
        /// The CSV file with the salary data, with columns `Name`, `Base Pay` and `Overtime`.
        #[clap(value_parser = existing_path)]
        pub data: PathBuf,
        /// The CSV file to write matched salary records to.
        ///
        /// Rows that could not be matched are written next to it, with `_missing` appended to the file name.
        pub output: PathBuf,
    }

    fn existing_path(path: &str) -> Result<PathBuf, String> {
        let path = PathBuf::from(path);
        if path.exists() {
            Ok(path)
        } else {
            Err(format!("Input file at '{}' does not exist", path.display()))
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let options::Args {
        options,
        id_path,
        data,
        output,
    } = options::Args::parse();
    log::info!("Starting import");

    let options = options
        .map(|path| -> anyhow::Result<salary_match::reconcile::Options> {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("Could not open options file at '{}'", path.display()))?;
            ron::de::from_reader(file)
                .with_context(|| format!("Could not decode options file at '{}'", path.display()))
        })
        .transpose()?
        .unwrap_or_default();

    let salary_match::reconcile::Outcome { matched, missing } =
        salary_match::reconcile(open(&id_path)?, open(&data)?, options)?;
    salary_match::write_files_with_missing(&matched, &missing, &output)?;
    Ok(())
}

fn open(path: &Path) -> anyhow::Result<impl std::io::Read> {
    Ok(std::io::BufReader::new(std::fs::File::open(path).with_context(
        || format!("Could not read from CSV file at '{}'", path.display()),
    )?))
}
