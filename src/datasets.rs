// src/datasets.rs

use crate::process::rename::ColumnMapping;

/// The five tables the scrape produces and the load stage consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Olympiad,
    ContinentalMedals,
    Sports,
    AthletesMedals,
    CountryMedals,
}

impl DatasetKind {
    /// Load order for the database stage.
    pub const ALL: [DatasetKind; 5] = [
        DatasetKind::Olympiad,
        DatasetKind::ContinentalMedals,
        DatasetKind::Sports,
        DatasetKind::AthletesMedals,
        DatasetKind::CountryMedals,
    ];

    pub fn table_name(&self) -> &'static str {
        match self {
            DatasetKind::Olympiad => "Olympiad",
            DatasetKind::ContinentalMedals => "ContinentalMedals",
            DatasetKind::Sports => "Sports",
            DatasetKind::AthletesMedals => "AthletesMedals",
            DatasetKind::CountryMedals => "CountryMedals",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.csv", self.table_name())
    }

    pub fn column_mapping(&self) -> ColumnMapping {
        match self {
            DatasetKind::AthletesMedals | DatasetKind::CountryMedals => ColumnMapping::new([
                ("GROUP", "Team"),
                ("G", "Gold"),
                ("S", "Silver"),
                ("B", "Bronze"),
                ("TOTAL", "Total"),
                ("Year", "Years"),
                ("Flag URL", "Flag_URL"),
            ]),
            DatasetKind::Olympiad => ColumnMapping::new([("Year", "Years")]),
            DatasetKind::ContinentalMedals => {
                ColumnMapping::new([("Year", "Years"), ("Rank", "Position")])
            }
            DatasetKind::Sports => ColumnMapping::new([("Olympic Status", "Olympic_Status")]),
        }
    }
}
