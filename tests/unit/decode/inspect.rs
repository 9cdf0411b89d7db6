use image::Rgba;

use super::*;
use crate::{
    codec::metadata::MetadataBlock,
    rows::encoder::{EntryKind, RowKind, TimelineEntry, encode_rows},
};

fn texture_with_block(config: &Config, rows: &RowArrays, width: u32) -> RgbaImage {
    let block = MetadataBlock::build(config, rows, width, 64).unwrap();
    let mut img = RgbaImage::from_pixel(128, 64, Rgba([255, 0, 255, 255]));
    block.write_into(&mut img).unwrap();
    img
}

#[test]
fn reads_back_config_and_rows() {
    let rows = encode_rows(
        &[
            TimelineEntry {
                top: 2,
                height: 4,
                kind: EntryKind::Header,
            },
            TimelineEntry {
                top: 6,
                height: 3,
                kind: EntryKind::Body {
                    colors: [4, 3, 3, 3],
                },
            },
        ],
        12,
        95,
    )
    .unwrap();
    let mut config = Config::fixture();
    config.scroll_height = 12;

    let img = texture_with_block(&config, &rows, 20);
    let block = read_block(&img).unwrap();

    assert_eq!(block.width, 20);
    assert_eq!(block.rows, rows);
    assert_eq!(block.value("row_count").unwrap(), 12);
    assert_eq!(block.rows.rows()[3].kind, RowKind::Header { offset: 1 });

    let decoded = block.config().unwrap();
    assert_eq!(
        Config {
            template_size: config.template_size,
            ..decoded
        },
        config
    );
}

#[test]
fn colors_are_not_codec_values() {
    let config = Config::fixture();
    let img = texture_with_block(&config, &RowArrays::default(), 16);
    let block = read_block(&img).unwrap();
    assert_eq!(block.palette().unwrap(), config.palette);
    assert!(block.values("palette").is_err());
}

#[test]
fn blank_image_is_rejected() {
    let img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]));
    assert!(read_block(&img).is_err());
}

#[test]
fn single_column_block_reads_its_height_from_the_next_row() {
    let config = Config::fixture();
    let img = texture_with_block(&config, &RowArrays::default(), 1);
    let block = read_block(&img).unwrap();
    assert_eq!((block.width, block.height), (1, 37));
    assert_eq!(block.value("viewport_w").unwrap(), config.viewport_w);
}
