use bevy::prelude::*;
use orrery::BodyDescriptor;

/// Links an entity to its catalog entry.
#[derive(Debug, Clone, Component)]
pub struct Body {
    pub id: String,
}

#[derive(Component)]
pub struct Star;

pub fn body_color(body: &BodyDescriptor) -> Color {
    let hex = body.color_or_default();

    Color::hex(hex.trim_start_matches('#')).unwrap_or_else(|_| {
        warn!("Body {} has an unreadable color {hex}", body.id);
        Color::WHITE
    })
}

pub fn body_material(body: &BodyDescriptor, texture: Option<Handle<Image>>) -> StandardMaterial {
    let color = body_color(body);

    match texture {
        Some(texture) => StandardMaterial {
            base_color_texture: Some(texture),
            perceptual_roughness: 1.0,
            emissive: if body.is_central() { Color::WHITE } else { Color::BLACK },
            ..Default::default()
        },
        None if body.is_central() => StandardMaterial {
            base_color: color,
            emissive: color * 10.0,
            ..Default::default()
        },
        None => StandardMaterial {
            base_color: color,
            perceptual_roughness: 1.0,
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn body(color: Option<&str>) -> BodyDescriptor {
        BodyDescriptor {
            id: "earth".to_string(),
            distance: 1.0,
            color: color.map(str::to_string),
            ..Default::default()
        }
    }

    #[test_case(Some("#ff0000"), Color::rgb(1.0, 0.0, 0.0) ; "hex with hash")]
    #[test_case(Some("00ff00"), Color::rgb(0.0, 1.0, 0.0) ; "hex without hash")]
    #[test_case(Some("not a color"), Color::WHITE ; "garbage")]
    #[test_case(None, Color::WHITE ; "missing")]
    fn colors(color: Option<&str>, expected: Color) {
        assert_eq!(body_color(&body(color)).as_rgba_u8(), expected.as_rgba_u8());
    }

    #[test]
    fn planets_are_not_emissive() {
        let material = body_material(&body(Some("#3366ff")), None);

        assert_eq!(material.emissive, Color::BLACK);
    }
}
