use crate::{load, name};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] load::Error),
    #[error("The {column} value '{value}' of the salary row in line {line} is not a number")]
    Currency {
        line: u64,
        column: &'static str,
        value: String,
        source: std::num::ParseFloatError,
    },
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Options {
    pub identity_columns: load::IdentityColumns,
    pub salary_columns: load::SalaryColumns,
    /// The year of the salary disclosure, stamped onto every matched record.
    pub year: u16,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            identity_columns: Default::default(),
            salary_columns: Default::default(),
            year: 2020,
        }
    }
}

/// A salary row linked to an officer, in the shape it is imported with.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MatchedRecord {
    pub salary: f64,
    pub overtime_pay: Option<f64>,
    pub officer_id: i64,
    /// Assigned by the destination on import, always empty here.
    pub id: Option<i64>,
    pub year: u16,
}

/// A salary row for which no officer could be found, kept as-is for manual review.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MissingRecord {
    #[serde(skip)]
    pub line: u64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Base Pay")]
    pub base_pay: String,
    #[serde(rename = "Overtime")]
    pub overtime: String,
    pub first: String,
    pub last: String,
    pub id: Option<i64>,
}

impl MatchedRecord {
    pub const HEADERS: &'static [&'static str] =
        &["salary", "overtime_pay", "officer_id", "id", "year"];
}

impl MissingRecord {
    pub const HEADERS: &'static [&'static str] =
        &["Name", "Base Pay", "Overtime", "first", "last", "id"];
}

/// A salary row after the left join with the identity roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRow {
    pub salary: load::SalaryRecord,
    /// `None` if the name could not be split into first and last name.
    pub name: Option<name::Name>,
    /// `None` if no identity carries the same name.
    pub id: Option<i64>,
}

#[derive(Debug)]
pub struct Outcome {
    pub matched: Vec<MatchedRecord>,
    pub missing: Vec<MissingRecord>,
}

pub(crate) mod function {
    use crate::load::{self, IdentityRecord, SalaryRecord};
    use crate::name::{normalize_name, Name};
    use crate::reconcile::{Error, JoinedRow, MatchedRecord, MissingRecord, Options, Outcome};
    use crate::{parse_currency, parse_optional_currency};
    use std::collections::HashMap;

    /// Match the salary rows in `salaries` to the officers in `identities` by name.
    pub fn reconcile(
        identities: impl std::io::Read,
        salaries: impl std::io::Read,
        Options {
            identity_columns,
            salary_columns,
            year,
        }: Options,
    ) -> Result<Outcome, Error> {
        let identities = load::read_identities(identities, &identity_columns)?;
        let salaries = load::read_salaries(salaries, &salary_columns)?;
        log::info!(
            "Matching {} salary rows against {} identities",
            salaries.len(),
            identities.len()
        );

        let (linked, missing) = partition(join(&identities, salaries));
        let matched = linked
            .into_iter()
            .map(|(row, officer_id)| format(row, officer_id, year))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "Matched {} salary records, {} could not be matched",
            matched.len(),
            missing.len()
        );
        Ok(Outcome { matched, missing })
    }

    /// Left-join `salaries` with `identities` on last and first name.
    ///
    /// Every salary row is returned at least once, and once per identity that shares its name.
    pub fn join(identities: &[IdentityRecord], salaries: Vec<SalaryRecord>) -> Vec<JoinedRow> {
        let mut ids_by_name = HashMap::<Name, Vec<i64>>::new();
        for identity in identities {
            ids_by_name
                .entry(Name {
                    first: identity.first.clone(),
                    last: identity.last.clone(),
                })
                .or_default()
                .push(identity.id);
        }

        let mut out = Vec::with_capacity(salaries.len());
        for salary in salaries {
            let name = match normalize_name(&salary.name) {
                Ok(name) => Some(name),
                Err(err) => {
                    log::warn!("Salary row in line {}: {err}", salary.line);
                    None
                }
            };
            let ids = name
                .as_ref()
                .and_then(|name| ids_by_name.get(name))
                .map(Vec::as_slice)
                .unwrap_or_default();
            match ids {
                [] => out.push(JoinedRow {
                    salary,
                    name,
                    id: None,
                }),
                ids => {
                    if ids.len() > 1 {
                        log::warn!(
                            "Salary row in line {} with name '{}' matches {} identities: {:?}",
                            salary.line,
                            salary.name,
                            ids.len(),
                            ids
                        );
                    }
                    for id in ids {
                        out.push(JoinedRow {
                            salary: salary.clone(),
                            name: name.clone(),
                            id: Some(*id),
                        });
                    }
                }
            }
        }
        out
    }

    /// Split joined rows into those linked to an officer id and those without one.
    pub fn partition(rows: Vec<JoinedRow>) -> (Vec<(JoinedRow, i64)>, Vec<MissingRecord>) {
        let mut linked = Vec::new();
        let mut missing = Vec::new();
        for row in rows {
            match row.id {
                Some(id) => linked.push((row, id)),
                None => {
                    let Name { first, last } = row.name.unwrap_or(Name {
                        first: String::new(),
                        last: String::new(),
                    });
                    missing.push(MissingRecord {
                        line: row.salary.line,
                        name: row.salary.name,
                        base_pay: row.salary.base_pay,
                        overtime: row.salary.overtime,
                        first,
                        last,
                        id: None,
                    });
                }
            }
        }
        (linked, missing)
    }

    /// Reduce a linked row to the imported shape, parsing its currency amounts.
    pub fn format(row: JoinedRow, officer_id: i64, year: u16) -> Result<MatchedRecord, Error> {
        let SalaryRecord {
            line,
            base_pay,
            overtime,
            ..
        } = row.salary;
        let salary = parse_currency(&base_pay).map_err(|err| Error::Currency {
            line,
            column: "salary",
            value: base_pay.clone(),
            source: err,
        })?;
        let overtime_pay = parse_optional_currency(&overtime).map_err(|err| Error::Currency {
            line,
            column: "overtime",
            value: overtime.clone(),
            source: err,
        })?;
        Ok(MatchedRecord {
            salary,
            overtime_pay,
            officer_id,
            id: None,
            year,
        })
    }
}
