//! Canned data shown to organizations whose plan only unlocks a preview.
//!
//! Sample rows use negative ids so they can never be mistaken for stored
//! records, and a fixed timestamp so responses are stable.

use crate::models::{
    Asset, AssetCondition, BoundingBox, IssueReport, IssueStatus, RoadSegment,
};
use chrono::{DateTime, Utc};

/// 2024-01-01T00:00:00Z
const SAMPLE_EPOCH: i64 = 1_704_067_200;

/// Center used when no bounding box is known.
const DEFAULT_CENTER: (f64, f64) = (39.7817, -89.6501);

fn sample_timestamp() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(SAMPLE_EPOCH, 0).unwrap_or_default()
}

pub trait SampleDataProvider {
    type Item;

    fn sample(&self, organization_id: i32) -> Vec<Self::Item>;
}

pub struct AssetSamples;

impl SampleDataProvider for AssetSamples {
    type Item = Asset;

    fn sample(&self, organization_id: i32) -> Vec<Asset> {
        let (lat, lon) = DEFAULT_CENTER;
        [
            ("Main Street Bridge", "bridge", AssetCondition::Fair, 0.0012, 0.0020),
            ("Elm Park Playground", "park", AssetCondition::Good, -0.0031, 0.0044),
            ("Water Tower No. 2", "water", AssetCondition::Poor, 0.0057, -0.0018),
            ("Route 9 Culvert", "drainage", AssetCondition::Critical, -0.0065, -0.0072),
            ("City Hall Lot Lighting", "lighting", AssetCondition::Good, 0.0004, -0.0009),
        ]
        .iter()
        .enumerate()
        .map(|(index, (name, category, condition, dlat, dlon))| Asset {
            id: -(index as i32 + 1),
            organization_id,
            name: name.to_string(),
            category: category.to_string(),
            condition: *condition,
            latitude: lat + dlat,
            longitude: lon + dlon,
            created_at: sample_timestamp(),
            updated_at: sample_timestamp(),
        })
        .collect()
    }
}

pub struct IssueSamples;

impl SampleDataProvider for IssueSamples {
    type Item = IssueReport;

    fn sample(&self, organization_id: i32) -> Vec<IssueReport> {
        let (lat, lon) = DEFAULT_CENTER;
        [
            (
                "Pothole on 5th Avenue",
                "Deep pothole in the eastbound lane near the school crossing.",
                "road",
                IssueStatus::Open,
            ),
            (
                "Streetlight out",
                "Light pole #114 has been dark for a week.",
                "lighting",
                IssueStatus::InProgress,
            ),
            (
                "Graffiti on underpass",
                "Fresh tags on the north wall of the rail underpass.",
                "vandalism",
                IssueStatus::Resolved,
            ),
        ]
        .iter()
        .enumerate()
        .map(|(index, (title, description, category, status))| IssueReport {
            id: -(index as i32 + 1),
            organization_id,
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            status: *status,
            latitude: lat + 0.002 * index as f64,
            longitude: lon - 0.003 * index as f64,
            reporter_email: None,
            created_at: sample_timestamp(),
            updated_at: sample_timestamp(),
        })
        .collect()
    }
}

/// Road samples are laid out inside the requested box so the map stays put.
#[derive(Default)]
pub struct RoadSamples {
    pub bbox: Option<BoundingBox>,
}

impl SampleDataProvider for RoadSamples {
    type Item = RoadSegment;

    fn sample(&self, _organization_id: i32) -> Vec<RoadSegment> {
        let (lat, lon) = match self.bbox {
            Some(bbox) => ((bbox.south + bbox.north) / 2.0, (bbox.west + bbox.east) / 2.0),
            None => DEFAULT_CENTER,
        };
        let span = 0.002;

        vec![
            RoadSegment {
                id: -1,
                name: Some("Sample Avenue".to_string()),
                highway: "primary".to_string(),
                coordinates: vec![[lon - span, lat], [lon, lat], [lon + span, lat]],
            },
            RoadSegment {
                id: -2,
                name: Some("Sample Street".to_string()),
                highway: "residential".to_string(),
                coordinates: vec![[lon, lat - span], [lon, lat], [lon, lat + span]],
            },
            RoadSegment {
                id: -3,
                name: None,
                highway: "service".to_string(),
                coordinates: vec![[lon + span, lat], [lon + span, lat + span]],
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_ids_are_negative() {
        assert!(AssetSamples.sample(4).iter().all(|asset| asset.id < 0));
        assert!(IssueSamples.sample(4).iter().all(|issue| issue.id < 0));
        assert!(RoadSamples::default().sample(4).iter().all(|road| road.id < 0));
    }

    #[test]
    fn samples_belong_to_requesting_organization() {
        assert!(AssetSamples
            .sample(12)
            .iter()
            .all(|asset| asset.organization_id == 12));
        assert!(IssueSamples
            .sample(12)
            .iter()
            .all(|issue| issue.organization_id == 12));
    }

    #[test]
    fn samples_are_stable() {
        assert_eq!(AssetSamples.sample(1), AssetSamples.sample(1));
        assert_eq!(AssetSamples.sample(1)[0].created_at, sample_timestamp());
    }

    #[test]
    fn road_samples_follow_bbox() {
        let bbox = BoundingBox {
            south: 52.50,
            west: 13.38,
            north: 52.52,
            east: 13.42,
        };
        let roads = RoadSamples { bbox: Some(bbox) }.sample(1);
        for road in roads {
            for [lon, lat] in road.coordinates {
                assert!(lat > bbox.south && lat < bbox.north);
                assert!(lon > bbox.west && lon < bbox.east);
            }
        }
    }
}
