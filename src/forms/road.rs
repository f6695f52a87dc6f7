use crate::models::BoundingBox;
use serde_derive::Deserialize;

/// `?south=&west=&north=&east=` plus the usual organization scope.
#[derive(Debug, Deserialize)]
pub struct RoadQuery {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
    pub organization_id: Option<i32>,
}

impl RoadQuery {
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox {
            south: self.south,
            west: self.west,
            north: self.north,
            east: self.east,
        }
    }
}
