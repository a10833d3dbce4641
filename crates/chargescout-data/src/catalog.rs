//! The dataset catalog: one data directory bound to the source files of an
//! analysis pass.

use crate::error::Result;
use crate::loader::{self, Row};
use crate::postcode::PostcodeIndex;
use chargescout_core::models::{PointRecord, SegmentRecord, ZonedRecord};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File names for each source dataset, overridable through configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetFiles {
    pub existing_chargers: String,
    pub petrol_stations: String,
    pub traffic_counts: String,
    pub postcode_coordinates: String,
    pub ev_registrations: String,
    pub proposed_investment: String,
    pub grid_assets: String,
    pub metro_forecast: String,
    pub regional_forecast: String,
    pub approved_chargers: String,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            existing_chargers: "consolidated_existing_chargers.csv".to_string(),
            petrol_stations: "petrol_station_data.csv".to_string(),
            traffic_counts: "traffic_data_2018.csv".to_string(),
            postcode_coordinates: "australian_postcodes_coordinates.csv".to_string(),
            ev_registrations: "ev_registrations_2017_to_2021.csv".to_string(),
            proposed_investment: "proposed_investment.csv".to_string(),
            grid_assets: "All_NSPs_annual_input_output_data_2023.csv".to_string(),
            metro_forecast: "metro_optimal.csv".to_string(),
            regional_forecast: "regional_optimal.csv".to_string(),
            approved_chargers: "approved_chargers.csv".to_string(),
        }
    }
}

/// One directory of source datasets. Loading is lazy: each accessor reads
/// its file on call, and every analysis pass gets fresh records.
#[derive(Debug, Clone)]
pub struct DatasetCatalog {
    data_dir: PathBuf,
    files: DatasetFiles,
}

impl DatasetCatalog {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_files(data_dir, DatasetFiles::default())
    }

    pub fn with_files(data_dir: impl Into<PathBuf>, files: DatasetFiles) -> Self {
        Self {
            data_dir: data_dir.into(),
            files,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn files(&self) -> &DatasetFiles {
        &self.files
    }

    pub fn path_of(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    pub fn existing_chargers(&self) -> Result<Vec<PointRecord>> {
        loader::read_point_records(self.path_of(&self.files.existing_chargers))
    }

    pub fn petrol_stations(&self) -> Result<Vec<PointRecord>> {
        loader::read_point_records(self.path_of(&self.files.petrol_stations))
    }

    pub fn traffic_counts(&self) -> Result<Vec<PointRecord>> {
        loader::read_point_records(self.path_of(&self.files.traffic_counts))
    }

    pub fn proposed_investment(&self) -> Result<Vec<PointRecord>> {
        loader::read_point_records(self.path_of(&self.files.proposed_investment))
    }

    pub fn approved_chargers(&self) -> Result<Vec<PointRecord>> {
        loader::read_point_records(self.path_of(&self.files.approved_chargers))
    }

    pub fn metro_forecast(&self) -> Result<Vec<PointRecord>> {
        loader::read_point_records(self.path_of(&self.files.metro_forecast))
    }

    pub fn grid_assets(&self) -> Result<Vec<SegmentRecord>> {
        loader::read_segment_records(self.path_of(&self.files.grid_assets))
    }

    pub fn regional_forecast(&self) -> Result<Vec<ZonedRecord>> {
        loader::read_zoned_records(self.path_of(&self.files.regional_forecast))
    }

    pub fn ev_registrations(&self) -> Result<Vec<Row>> {
        loader::read_rows(self.path_of(&self.files.ev_registrations))
    }

    pub fn postcode_index(&self) -> Result<PostcodeIndex> {
        PostcodeIndex::from_csv(self.path_of(&self.files.postcode_coordinates))
    }
}
