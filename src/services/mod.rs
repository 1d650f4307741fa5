pub mod radar_service;

pub use radar_service::{
    CreateRadarEntry, RadarService, ServiceError, UpdateClassification, UpdateTechnology,
};
