//! Contact footprint computation for touch-down events.
//!
//! The footprint of a contact is the physical area the hardware reports
//! for it, expressed as width/height sample properties in device units.
//! The union of every intermediate sample's footprint rectangle gives
//! the touch area of a down notification.

use thiserror::Error;

use crate::input::{ContactSample, PropertyUnit, SampleProperty};
use crate::types::{Point, Rect, Size, CM_PER_INCH, UNITS_PER_INCH};

/// Resolutions this close to zero make a property value unusable.
const RESOLUTION_EPSILON: f32 = 0.001;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertyError {
    /// A footprint extent was requested for a property that is not a
    /// contact-size property.
    #[error("{0:?} is not a contact-size property")]
    NotASizeProperty(SampleProperty),
}

/// The extent of a sample's footprint along one axis, in
/// device-independent units ([`UNITS_PER_INCH`] per inch).
///
/// Only [`SampleProperty::ContactWidth`] and
/// [`SampleProperty::ContactHeight`] are valid requests; anything else
/// is a configuration error. A sample that lacks the property, or
/// reports it with a (near-)zero resolution, yields `0.0` rather than
/// failing.
pub fn footprint_extent(
    sample: &ContactSample,
    property: SampleProperty,
) -> Result<f32, PropertyError> {
    match property {
        SampleProperty::ContactWidth | SampleProperty::ContactHeight => {
            Ok(size_extent(sample, property))
        }
        other => Err(PropertyError::NotASizeProperty(other)),
    }
}

fn size_extent(sample: &ContactSample, property: SampleProperty) -> f32 {
    let Some(prop) = sample.properties.get(&property) else {
        return 0.0;
    };
    if prop.resolution.abs() <= RESOLUTION_EPSILON {
        return 0.0;
    }
    let mut value = prop.value / prop.resolution;
    if prop.unit == PropertyUnit::Centimeters {
        value /= CM_PER_INCH;
    }
    value * UNITS_PER_INCH
}

/// Union of every sample's footprint rectangle, positioned relative to
/// the surface at `origin`. Samples without footprint properties
/// contribute a zero-size rectangle at their position; an empty sample
/// list yields the zero rectangle.
pub(crate) fn contact_area(samples: &[ContactSample], origin: Point) -> Rect {
    let mut area: Option<Rect> = None;
    for sample in samples {
        let width = size_extent(sample, SampleProperty::ContactWidth);
        let height = size_extent(sample, SampleProperty::ContactHeight);
        let footprint = Rect::new(
            sample.position - origin.to_vector(),
            Size::new(width, height),
        );
        area = Some(match area {
            Some(current) => current.union(&footprint),
            None => footprint,
        });
    }
    area.unwrap_or_else(Rect::zero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PropertyValue;

    fn sized_sample(x: f32, y: f32, width: f32, height: f32) -> ContactSample {
        let value = |v| PropertyValue {
            value: v,
            resolution: 1.0,
            unit: PropertyUnit::Inches,
        };
        ContactSample::new(Point::new(x, y))
            .with_property(SampleProperty::ContactWidth, value(width / UNITS_PER_INCH))
            .with_property(SampleProperty::ContactHeight, value(height / UNITS_PER_INCH))
    }

    #[test]
    fn test_rejects_non_size_properties() {
        let sample = ContactSample::new(Point::zero());
        assert_eq!(
            footprint_extent(&sample, SampleProperty::Pressure),
            Err(PropertyError::NotASizeProperty(SampleProperty::Pressure))
        );
        assert_eq!(
            footprint_extent(&sample, SampleProperty::X),
            Err(PropertyError::NotASizeProperty(SampleProperty::X))
        );
    }

    #[test]
    fn test_missing_property_degrades_to_zero() {
        let sample = ContactSample::new(Point::zero());
        assert_eq!(footprint_extent(&sample, SampleProperty::ContactWidth), Ok(0.0));
    }

    #[test]
    fn test_zero_resolution_degrades_to_zero() {
        let sample = ContactSample::new(Point::zero()).with_property(
            SampleProperty::ContactWidth,
            PropertyValue {
                value: 10.0,
                resolution: 0.0,
                unit: PropertyUnit::Inches,
            },
        );
        assert_eq!(footprint_extent(&sample, SampleProperty::ContactWidth), Ok(0.0));
    }

    #[test]
    fn test_centimeter_conversion() {
        // 2.54 device units at 1 unit/cm is one inch.
        let sample = ContactSample::new(Point::zero()).with_property(
            SampleProperty::ContactWidth,
            PropertyValue {
                value: 2.54,
                resolution: 1.0,
                unit: PropertyUnit::Centimeters,
            },
        );
        let extent = footprint_extent(&sample, SampleProperty::ContactWidth).unwrap();
        assert!((extent - UNITS_PER_INCH).abs() < 1e-3);
    }

    #[test]
    fn test_resolution_scaling() {
        // 20 device units at 10 units/inch is two inches.
        let sample = ContactSample::new(Point::zero()).with_property(
            SampleProperty::ContactHeight,
            PropertyValue {
                value: 20.0,
                resolution: 10.0,
                unit: PropertyUnit::Inches,
            },
        );
        let extent = footprint_extent(&sample, SampleProperty::ContactHeight).unwrap();
        assert!((extent - 2.0 * UNITS_PER_INCH).abs() < 1e-3);
    }

    #[test]
    fn test_union_of_two_footprints() {
        // 4x4 and 6x6 footprints at the same location: the union is the
        // 6x6 bounding rectangle.
        let samples = vec![sized_sample(10.0, 10.0, 4.0, 4.0), sized_sample(10.0, 10.0, 6.0, 6.0)];
        let area = contact_area(&samples, Point::zero());
        assert_eq!(area, Rect::new(Point::new(10.0, 10.0), Size::new(6.0, 6.0)));
    }

    #[test]
    fn test_union_spans_separated_footprints() {
        let samples = vec![sized_sample(0.0, 0.0, 4.0, 4.0), sized_sample(10.0, 0.0, 4.0, 4.0)];
        let area = contact_area(&samples, Point::zero());
        assert_eq!(area, Rect::new(Point::zero(), Size::new(14.0, 4.0)));
    }

    #[test]
    fn test_sizeless_samples_do_not_abort_the_union() {
        // Zero-size footprints are absorbed by the union instead of
        // extending it.
        let samples = vec![
            sized_sample(5.0, 5.0, 4.0, 4.0),
            ContactSample::new(Point::new(20.0, 5.0)),
        ];
        let area = contact_area(&samples, Point::zero());
        assert_eq!(area, Rect::new(Point::new(5.0, 5.0), Size::new(4.0, 4.0)));
    }

    #[test]
    fn test_area_is_surface_relative() {
        let samples = vec![sized_sample(15.0, 25.0, 4.0, 4.0)];
        let area = contact_area(&samples, Point::new(10.0, 20.0));
        assert_eq!(area, Rect::new(Point::new(5.0, 5.0), Size::new(4.0, 4.0)));
    }

    #[test]
    fn test_no_samples_yield_zero_rect() {
        assert_eq!(contact_area(&[], Point::zero()), Rect::zero());
    }
}
