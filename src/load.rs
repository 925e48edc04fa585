#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("A required column named '{name}' could not be found in the header line of the {kind} CSV file")]
    MissingColumn { name: String, kind: &'static str },
    #[error("Row in line {line} did not have a value for column '{name}'")]
    ColumnMissingInRow { line: u64, name: String },
    #[error("Identity in line {line} has id '{value}' which is not an integer")]
    InvalidId {
        line: u64,
        value: String,
        source: std::num::ParseIntError,
    },
}

/// Names of the identity roster columns to read.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IdentityColumns {
    pub id: String,
    pub first: String,
    pub last: String,
}

impl Default for IdentityColumns {
    fn default() -> Self {
        IdentityColumns {
            id: "id".into(),
            first: "first name".into(),
            last: "last name".into(),
        }
    }
}

/// Names of the salary extract columns to read.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SalaryColumns {
    pub name: String,
    pub base_pay: String,
    pub overtime: String,
}

impl Default for SalaryColumns {
    fn default() -> Self {
        SalaryColumns {
            name: "Name".into(),
            base_pay: "Base Pay".into(),
            overtime: "Overtime".into(),
        }
    }
}

/// A CSV file reduced to an allow-list of columns.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// The column names, in the order they were requested.
    pub headers: csv::StringRecord,
    /// Each row along with the line it started on in the input.
    pub rows: Vec<(u64, csv::StringRecord)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    pub id: i64,
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryRecord {
    /// The line in the salary CSV this record was read from.
    pub line: u64,
    pub name: String,
    pub base_pay: String,
    pub overtime: String,
}

/// Read `input` as CSV with a header line and keep only `columns`, in that order.
///
/// `kind` names the input in error messages.
pub fn read_table(
    input: impl std::io::Read,
    columns: &[&str],
    kind: &'static str,
) -> Result<Table, Error> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let headers = csv.headers()?;
    let indices = columns
        .iter()
        .map(|name| {
            headers
                .iter()
                .position(|header| header == *name)
                .ok_or_else(|| Error::MissingColumn {
                    name: name.to_string(),
                    kind,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::new();
    for record in csv.into_records() {
        let record = record?;
        let line = record.position().map_or(0, |pos| pos.line());
        let row = indices
            .iter()
            .zip(columns)
            .map(|(index, name)| {
                record.get(*index).ok_or_else(|| Error::ColumnMissingInRow {
                    line,
                    name: name.to_string(),
                })
            })
            .collect::<Result<csv::StringRecord, _>>()?;
        rows.push((line, row));
    }

    Ok(Table {
        headers: columns.iter().collect(),
        rows,
    })
}

pub fn read_identities(
    input: impl std::io::Read,
    columns: &IdentityColumns,
) -> Result<Vec<IdentityRecord>, Error> {
    let table = read_table(
        input,
        &[columns.id.as_str(), columns.first.as_str(), columns.last.as_str()],
        "identity",
    )?;
    table
        .rows
        .into_iter()
        .map(|(line, row)| {
            let id = &row[0];
            Ok(IdentityRecord {
                id: id.trim().parse().map_err(|err| Error::InvalidId {
                    line,
                    value: id.to_owned(),
                    source: err,
                })?,
                first: row[1].to_owned(),
                last: row[2].to_owned(),
            })
        })
        .collect()
}

pub fn read_salaries(
    input: impl std::io::Read,
    columns: &SalaryColumns,
) -> Result<Vec<SalaryRecord>, Error> {
    let table = read_table(
        input,
        &[
            columns.name.as_str(),
            columns.base_pay.as_str(),
            columns.overtime.as_str(),
        ],
        "salary",
    )?;
    Ok(table
        .rows
        .into_iter()
        .map(|(line, row)| SalaryRecord {
            line,
            name: row[0].to_owned(),
            base_pay: row[1].to_owned(),
            overtime: row[2].to_owned(),
        })
        .collect())
}
