use icon_png::{
    chunks::{iter_chunks, Chunk},
    decode, encode, Encoder, PngError, Rgb,
};
use image::{ColorType, GenericImageView, ImageFormat};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Horizontal gradient from (102, 126, 234) towards (118, 75, 162) over 16 columns.
fn scenario_color(x: u32, _y: u32) -> Rgb {
    let x = x as f64;
    Rgb::new(
        (102.0 + (16.0 * x / 16.0).round()) as u8,
        (126.0 - (51.0 * x / 16.0).round()) as u8,
        (234.0 - (72.0 * x / 16.0).round()) as u8,
    )
}

fn pattern(x: u32, y: u32) -> Rgb {
    Rgb::new((x * 7) as u8, (y * 13) as u8, (x ^ y) as u8)
}

#[test]
fn sixteen_pixel_gradient_end_to_end() {
    let png = encode(16, 16, scenario_color).unwrap();
    assert_eq!(&png[..8], [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a]);

    let chunk_types: Vec<_> = iter_chunks(&png[8..])
        .map(|chunk| chunk.unwrap().type_name().into_owned())
        .collect();
    assert_eq!(chunk_types, ["IHDR", "IDAT", "IEND"]);

    let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
    assert_eq!(decoded.color(), ColorType::Rgb8);
    assert_eq!(decoded.dimensions(), (16, 16));
    let rgb = decoded.to_rgb8();
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let expected = scenario_color(x, y);
        assert_eq!(pixel.0, [expected.red, expected.green, expected.blue]);
    }
}

#[test]
fn ihdr_chunk_bytes() {
    let png = encode(16, 16, scenario_color).unwrap();
    insta::assert_snapshot!(hex(&png[8..33]), @"0000000d494844520000001000000010080200000090916836");

    let png = encode(1, 1, scenario_color).unwrap();
    insta::assert_snapshot!(hex(&png[8..33]), @"0000000d4948445200000001000000010802000000907753de");
}

#[test]
fn iend_chunk_bytes() {
    let png = encode(3, 3, pattern).unwrap();
    insta::assert_snapshot!(hex(&png[png.len() - 12..]), @"0000000049454e44ae426082");
}

#[test]
fn ihdr_fields_decode() {
    let png = encode(16, 16, scenario_color).unwrap();
    let raw = iter_chunks(&png[8..]).next().unwrap().unwrap();
    let Chunk::IHDR(header) = Chunk::parse(raw).unwrap() else {
        panic!("first chunk is not IHDR");
    };
    assert_eq!((header.width, header.height), (16, 16));
    assert_eq!(header.bit_depth, 8);
    assert_eq!(header.color_type as u8, 2);
    assert_eq!(header.compression_method, 0);
    assert_eq!(header.filter_method, 0);
    assert_eq!(header.interlace_method as u8, 0);
}

#[test]
fn every_chunk_crc_verifies() {
    let png = encode(48, 48, pattern).unwrap();
    for chunk in iter_chunks(&png[8..]) {
        let chunk = chunk.unwrap();
        assert_eq!(chunk.crc, chunk.expected_crc(), "{}", chunk.type_name());
    }
}

#[test]
fn external_decoder_reproduces_pixels_at_many_sizes() {
    for (width, height) in [(1, 1), (1, 9), (9, 1), (32, 32), (48, 48), (128, 128), (129, 3)] {
        let png = encode(width, height, pattern).unwrap();
        let rgb = image::load_from_memory_with_format(&png, ImageFormat::Png)
            .unwrap()
            .to_rgb8();
        assert_eq!(rgb.dimensions(), (width, height));
        for (x, y, pixel) in rgb.enumerate_pixels() {
            let expected = pattern(x, y);
            assert_eq!(pixel.0, [expected.red, expected.green, expected.blue]);
        }

        let ours = decode(&png).unwrap();
        assert_eq!((ours.width(), ours.height()), (width, height));
        assert_eq!(ours.pixel(width - 1, height - 1), Some(pattern(width - 1, height - 1)));
    }
}

#[test]
fn every_compression_level_decodes() {
    for level in 0..=10 {
        let png = Encoder::new(20, 20)
            .compression_level(level)
            .encode(pattern)
            .unwrap();
        let rgb = image::load_from_memory_with_format(&png, ImageFormat::Png)
            .unwrap()
            .to_rgb8();
        assert_eq!(rgb.get_pixel(19, 19).0, pattern(19, 19).to_bytes());
    }
}

#[test]
fn corrupted_payload_is_rejected() {
    let png = encode(16, 16, scenario_color).unwrap();
    // First byte of each chunk payload: IHDR width, then IDAT data.
    for offset in [8 + 8, 8 + 25 + 8] {
        let mut corrupted = png.clone();
        corrupted[offset] ^= 0x40;
        assert!(
            matches!(decode(&corrupted), Err(PngError::Chunk(_))),
            "byte {offset}"
        );
        assert!(image::load_from_memory_with_format(&corrupted, ImageFormat::Png).is_err());
    }
}

#[test]
fn identical_inputs_give_identical_bytes() {
    assert_eq!(
        encode(128, 128, scenario_color).unwrap(),
        encode(128, 128, scenario_color).unwrap()
    );
}

#[test]
fn zero_dimensions_are_rejected() {
    assert!(matches!(
        encode(0, 1, pattern),
        Err(PngError::InvalidDimensions { width: 0, height: 1 })
    ));
}
