use chrono::NaiveDate;

use super::*;
use crate::{calendar::model::CalendarEvent, layout::text::PlaceholderShaper};

fn template() -> RgbaImage {
    RgbaImage::from_fn(1024, 1447, |x, y| Rgba([(x % 251) as u8, (y % 241) as u8, 40, 255]))
}

fn banner() -> RgbaImage {
    RgbaImage::from_fn(930, 95, |x, _| {
        if x < 8 || x >= 922 {
            Rgba([200, 180, 150, 200])
        } else {
            Rgba([220, 200, 170, 255])
        }
    })
}

fn now() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2020-05-30T12:00:00+09:00").unwrap()
}

fn run(days: &[CalendarDay], style: &Style) -> ScrollcalResult<GeneratedTexture> {
    let template = template();
    let banner = banner();
    let inputs = GenerateInputs {
        template: &template,
        day_header: &banner,
        days,
        generated_at: now(),
        branch: "main",
    };
    generate(&inputs, style, &mut PlaceholderShaper)
}

#[test]
fn reserved_band_places_sprites_after_the_borders() {
    let style = Style::default();
    let header = SlicedHeader::slice(&banner(), 8, 1).unwrap();
    let band = reserved_band(&template(), &header, &style).unwrap();

    // Transposed scroll section (728) plus right padding.
    assert_eq!(band.color_x, 728 + 32 + 32);
    assert_eq!(band.alpha_x, band.color_x + 17 + 64);
    // Two stacked borders, each padded above and below.
    assert_eq!(band.image.height(), (23 + 64) + (71 + 64));
}

#[test]
fn config_reflects_template_geometry() {
    let tex = run(&[], &Style::default()).unwrap();
    let c = &tex.config;
    assert_eq!((c.viewport_w, c.viewport_h), (1024, 1447));
    assert_eq!(c.header_h, 585);
    assert_eq!(c.footer_h, 1447 - 1313);
    assert_eq!(c.day_header_height, 95);
    assert_eq!(c.day_header_true_width, 930);
    assert_eq!(c.scroll_height, 0);
    assert!(c.header_tex_y < c.footer_tex_y);
    assert!(c.footer_tex_y < c.bg_sample_y);
    assert!(c.bg_sample_y < c.scroll_tex_y);
    assert_eq!(tex.image.width(), 1024);
    assert!(tex.image.height().is_power_of_two());
}

#[test]
fn text_rows_match_row_arrays() {
    let days = [CalendarDay {
        date: NaiveDate::from_ymd_opt(2020, 5, 30).unwrap(),
        events: vec![CalendarEvent {
            start: now(),
            end: None,
            title: "event".into(),
        }],
    }];
    let tex = run(&days, &Style::default()).unwrap();
    assert!(tex.config.scroll_height > 95);
    assert_eq!(tex.rows.len(), tex.config.scroll_height as usize);
    assert_eq!(tex.config.scroll_height % 3, 0);
}

#[test]
fn short_template_is_an_asset_error() {
    let small = RgbaImage::new(1024, 600);
    let banner = banner();
    let inputs = GenerateInputs {
        template: &small,
        day_header: &banner,
        days: &[],
        generated_at: now(),
        branch: "",
    };
    let err = generate(&inputs, &Style::default(), &mut PlaceholderShaper).unwrap_err();
    assert!(err.to_string().starts_with("asset error:"));
}

#[test]
fn generation_is_deterministic() {
    let a = run(&[], &Style::default()).unwrap();
    let b = run(&[], &Style::default()).unwrap();
    assert_eq!(a.fingerprint, b.fingerprint);
}
