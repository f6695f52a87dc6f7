use serde_derive::{Deserialize, Serialize};

/// OSM way tagged `highway`, flattened for map rendering.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub id: i64,
    pub name: Option<String>,
    pub highway: String,
    /// `[lon, lat]` pairs in way order, GeoJSON style.
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// Largest area, in square degrees, a single road query may cover.
pub const MAX_BBOX_AREA: f64 = 0.25;

impl BoundingBox {
    pub fn validate(&self) -> Result<(), String> {
        let in_range = (-90.0..=90.0).contains(&self.south)
            && (-90.0..=90.0).contains(&self.north)
            && (-180.0..=180.0).contains(&self.west)
            && (-180.0..=180.0).contains(&self.east);
        if !in_range {
            return Err("Bounding box is out of range".to_string());
        }
        if self.south >= self.north || self.west >= self.east {
            return Err("Bounding box must have south < north and west < east".to_string());
        }
        if self.area() > MAX_BBOX_AREA {
            return Err(format!(
                "Bounding box is too large ({:.3} > {} square degrees)",
                self.area(),
                MAX_BBOX_AREA
            ));
        }
        Ok(())
    }

    pub fn area(&self) -> f64 {
        (self.north - self.south) * (self.east - self.west)
    }

    /// Cache key, rounded so that tiny pans reuse the same entry.
    pub fn cache_key(&self) -> String {
        format!(
            "{:.4},{:.4},{:.4},{:.4}",
            self.south, self.west, self.north, self.east
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(south: f64, west: f64, north: f64, east: f64) -> BoundingBox {
        BoundingBox {
            south,
            west,
            north,
            east,
        }
    }

    #[test]
    fn accepts_small_city_box() {
        assert!(bbox(52.50, 13.38, 52.53, 13.42).validate().is_ok());
    }

    #[test]
    fn rejects_inverted_or_oversized_boxes() {
        assert!(bbox(52.53, 13.38, 52.50, 13.42).validate().is_err());
        assert!(bbox(50.0, 10.0, 52.0, 12.0).validate().is_err());
        assert!(bbox(-95.0, 10.0, 52.0, 12.0).validate().is_err());
    }

    #[test]
    fn cache_key_is_rounded() {
        let a = bbox(52.500001, 13.38, 52.53, 13.42);
        let b = bbox(52.500002, 13.38, 52.53, 13.42);
        assert_eq!(a.cache_key(), b.cache_key());
    }
}
