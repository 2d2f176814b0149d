use std::time::SystemTime;

use super::point::Point;
use crate::{collection::UpsData, constants::*};

/// Converts the UPS units read in one poll into points.
///
/// Every point is tagged with `ups_name`, `ups_model` and `ups_id`. If more
/// than one unit is present, `ups_name` becomes `<name_tag>|<id>` so the
/// series stay distinct.
pub fn ups_points(
    measurement: &str, name_tag: &str, units: &[UpsData], at: SystemTime,
) -> Vec<Point> {
    let disambiguate = units.len() > 1;

    units
        .iter()
        .map(|ups| {
            let name = if disambiguate {
                format!("{name_tag}|{}", ups.id)
            } else {
                name_tag.to_string()
            };

            Point::new(measurement, at)
                .tag(UPS_NAME_TAG, name)
                .tag(UPS_MODEL_TAG, ups.model.as_str())
                .tag(UPS_ID_TAG, ups.id.as_str())
                .field(BATTERY_CHARGE_PERCENT_FIELD, ups.battery_charge_percent)
                .field(AC_ATTACHED_FIELD, ups.ac_attached)
        })
        .collect()
}
