//! Color: sRGB компоненты `r`, `g`, `b` в диапазоне 0..1
//!
//! `set` принимает то же, что пишут в props: hex число (`0xff8800`),
//! hex строку (`"#f80"`, `"#ff8800"`), имя цвета (`"purple"`), другой Color
//! или три числа. Парсинг и линеаризация: bevy `Srgba` / `LinearRgba`.

use std::rc::Rc;

use bevy::color::palettes::basic;
use bevy::color::{LinearRgba, Srgba};
use scenebind_core::{log_warning, Class, ObjectRef, Value};

use crate::Catalog;

const CHANNELS: [&str; 3] = ["r", "g", "b"];

/// Именованные цвета (basic palette + синонимы)
fn named(name: &str) -> Option<Srgba> {
    let colour = match name.to_ascii_lowercase().as_str() {
        "aqua" | "cyan" => basic::AQUA,
        "black" => basic::BLACK,
        "blue" => basic::BLUE,
        "fuchsia" | "magenta" => basic::FUCHSIA,
        "gray" | "grey" => basic::GRAY,
        "green" => basic::GREEN,
        "lime" => basic::LIME,
        "maroon" => basic::MAROON,
        "navy" => basic::NAVY,
        "olive" => basic::OLIVE,
        "purple" => basic::PURPLE,
        "red" => basic::RED,
        "silver" => basic::SILVER,
        "teal" => basic::TEAL,
        "white" => basic::WHITE,
        "yellow" => basic::YELLOW,
        _ => return None,
    };
    Some(colour)
}

pub fn from_hex(hex: u32) -> Srgba {
    Srgba::rgb_u8(((hex >> 16) & 0xff) as u8, ((hex >> 8) & 0xff) as u8, (hex & 0xff) as u8)
}

pub fn to_hex(colour: Srgba) -> u32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    (channel(colour.red) << 16) | (channel(colour.green) << 8) | channel(colour.blue)
}

pub fn parse(text: &str) -> Option<Srgba> {
    named(text).or_else(|| Srgba::hex(text).ok())
}

pub fn read(object: &ObjectRef) -> Srgba {
    let channel = |key: &str| object.number(key).unwrap_or(0.0) as f32;
    Srgba::new(channel("r"), channel("g"), channel("b"), 1.0)
}

fn write(object: &ObjectRef, r: f32, g: f32, b: f32) {
    object.set("r", r as f64);
    object.set("g", g as f64);
    object.set("b", b as f64);
}

fn write_srgba(object: &ObjectRef, colour: Srgba) {
    write(object, colour.red, colour.green, colour.blue);
}

fn set_colour(this: &ObjectRef, args: &[Value]) {
    match args {
        [Value::Number(r), Value::Number(g), Value::Number(b), ..] => {
            write(this, *r as f32, *g as f32, *b as f32);
        }
        [Value::Number(hex), ..] => write_srgba(this, from_hex(*hex as u32)),
        [Value::Str(text), ..] => match parse(text) {
            Some(colour) => write_srgba(this, colour),
            None => log_warning(&format!("Color.set: unknown colour '{}'", text)),
        },
        [Value::Object(source), ..] => copy_colour(this, source),
        _ => log_warning(&format!("Color.set: unsupported arguments {:?}", args)),
    }
}

fn copy_colour(this: &ObjectRef, source: &ObjectRef) {
    for channel in CHANNELS {
        if let Some(n) = source.number(channel) {
            this.set(channel, n);
        }
    }
}

pub(crate) fn color_class() -> Rc<Class> {
    Class::builder("Color")
        .method("set", |this, args| {
            set_colour(this, args);
            Ok(Value::Undefined)
        })
        .method("copy", |this, args| {
            if let Some(Value::Object(source)) = args.first() {
                copy_colour(this, source);
            }
            Ok(Value::Undefined)
        })
        .method("convertSRGBToLinear", |this, _| {
            let linear = LinearRgba::from(read(this));
            write(this, linear.red, linear.green, linear.blue);
            Ok(Value::Undefined)
        })
        .method("getHex", |this, _| Ok(Value::from(to_hex(read(this)))))
        .build()
}

pub(crate) fn register(catalog: &mut Catalog) {
    catalog.register(catalog.color.clone(), |_, object| {
        write_srgba(object, basic::WHITE);
    });
}

impl Catalog {
    pub fn color(&self, r: f64, g: f64, b: f64) -> ObjectRef {
        let colour = self.instantiate(&self.color);
        colour.set("r", r);
        colour.set("g", g);
        colour.set("b", b);
        colour
    }

    pub fn color_hex(&self, hex: u32) -> ObjectRef {
        let colour = self.instantiate(&self.color);
        write_srgba(&colour, from_hex(hex));
        colour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(object: &ObjectRef) -> [f64; 3] {
        CHANNELS.map(|channel| object.number(channel).unwrap_or(f64::NAN))
    }

    #[test]
    fn test_set_from_hex_number() {
        let catalog = Catalog::new();
        let colour = catalog.color(0.0, 0.0, 0.0);
        colour.call("set", &[Value::from(0xff0000u32)]).unwrap();
        assert_eq!(rgb(&colour), [1.0, 0.0, 0.0]);
        assert_eq!(colour.call("getHex", &[]).unwrap().and_then(|v| v.as_number()), Some(0xff0000 as f64));
    }

    #[test]
    fn test_set_from_strings() {
        let catalog = Catalog::new();
        let colour = catalog.color(0.0, 0.0, 0.0);

        colour.call("set", &[Value::from("#00f")]).unwrap();
        assert_eq!(rgb(&colour), [0.0, 0.0, 1.0]);

        colour.call("set", &[Value::from("Lime")]).unwrap();
        assert_eq!(rgb(&colour), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unknown_string_leaves_colour_unchanged() {
        let catalog = Catalog::new();
        let colour = catalog.color(0.25, 0.5, 0.75);
        colour.call("set", &[Value::from("not-a-colour")]).unwrap();
        assert_eq!(rgb(&colour), [0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_linear_conversion_darkens_midtones() {
        let catalog = Catalog::new();
        let colour = catalog.color(0.5, 0.5, 0.5);
        colour.call("convertSRGBToLinear", &[]).unwrap();
        let [r, g, b] = rgb(&colour);
        assert!(r < 0.25 && r > 0.2, "linear midtone was {}", r);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_hex_roundtrip() {
        assert_eq!(to_hex(from_hex(0x12ab9f)), 0x12ab9f);
    }
}
