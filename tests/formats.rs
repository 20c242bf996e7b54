use bannerkit::Error;
use bannerkit::formats::bclim::{Bclim, TRAILER_SIZE};
use bannerkit::formats::cbmd::{self, Cbmd, HEADER_SIZE, LOCALE_COUNT, LOCALES};
use bannerkit::formats::darc::Darc;
use bannerkit::texture::PixelFormat;

fn read_u32(buf: &[u8], off: usize) -> u32 {
    u32::from_le_bytes(buf[off..off + 4].try_into().unwrap())
}

#[test]
fn cbmd_roundtrip_recovers_all_blobs() {
    let common: Vec<u8> = (0..4096u32).map(|i| (i * 7) as u8).collect();
    let locales: Vec<Vec<u8>> = (0..LOCALE_COUNT)
        .map(|i| format!("locale {} = {}", i, LOCALES[i]).into_bytes())
        .collect();
    let locale_refs: Vec<&[u8]> = locales.iter().map(Vec::as_slice).collect();
    let audio = b"CWAV-not-really-audio".to_vec();

    let banner = cbmd::build(&common, &locale_refs, &audio).unwrap();
    let parsed = Cbmd::parse(&banner).unwrap();

    assert_eq!(parsed.common, common);
    for (slot, expected) in parsed.locales.iter().zip(&locales) {
        assert_eq!(slot.as_deref(), Some(expected.as_slice()));
    }
    assert_eq!(parsed.audio, audio);
}

#[test]
fn cbmd_offsets_are_increasing_and_aligned() {
    let common = vec![1u8; 1000];
    let locales: Vec<Vec<u8>> = (0..LOCALE_COUNT).map(|i| vec![i as u8; 100 + i]).collect();
    let locale_refs: Vec<&[u8]> = locales.iter().map(Vec::as_slice).collect();
    let banner = cbmd::build(&common, &locale_refs, b"audio").unwrap();

    assert_eq!(&banner[..4], b"CBMD");
    let mut offsets = vec![read_u32(&banner, 0x08)];
    for i in 0..LOCALE_COUNT {
        offsets.push(read_u32(&banner, 0x0C + i * 4));
    }
    offsets.push(read_u32(&banner, 0x84));

    assert_eq!(offsets[0], HEADER_SIZE as u32);
    for pair in offsets.windows(2) {
        assert!(pair[0] < pair[1], "offsets not increasing: {offsets:?}");
    }
    // Every compressed blob starts 4-byte aligned.
    for &off in &offsets {
        assert_eq!(off % 4, 0);
    }
    // Audio sits at the recorded offset, uncompressed.
    let audio_off = *offsets.last().unwrap() as usize;
    assert_eq!(&banner[audio_off..], b"audio");
}

#[test]
fn cbmd_build_requires_thirteen_locales() {
    assert!(cbmd::build(b"c", &[b"only one".as_slice()], b"a").is_err());
}

#[test]
fn cbmd_optional_slots_stay_zero() {
    let banner = Cbmd {
        common: b"common only".to_vec(),
        locales: Default::default(),
        audio: Vec::new(),
    }
    .build()
    .unwrap();

    for i in 0..LOCALE_COUNT {
        assert_eq!(read_u32(&banner, 0x0C + i * 4), 0);
    }
    let parsed = Cbmd::parse(&banner).unwrap();
    assert_eq!(parsed.common, b"common only");
    assert!(parsed.locales.iter().all(Option::is_none));
}

#[test]
fn cbmd_rejects_bad_magic() {
    let mut banner = Cbmd::default().build().unwrap();
    banner[0] = b'X';
    assert!(matches!(Cbmd::parse(&banner), Err(Error::BadMagic)));
}

#[test]
fn cbmd_rejects_offset_inside_header() {
    let mut banner = Cbmd::default().build().unwrap();
    banner[0x08..0x0C].copy_from_slice(&4u32.to_le_bytes());
    assert!(matches!(Cbmd::parse(&banner), Err(Error::InvalidRange)));
}

#[test]
fn cbmd_rejects_offset_past_end() {
    let mut banner = Cbmd::default().build().unwrap();
    let past = banner.len() as u32 + 100;
    banner[0x0C..0x10].copy_from_slice(&past.to_le_bytes());
    assert!(matches!(Cbmd::parse(&banner), Err(Error::InvalidRange)));
}

#[test]
fn darc_roundtrip_named_files() {
    let files: &[(&str, &[u8])] = &[("a.bin", &[0x01, 0x02]), ("b.bin", &[0x03])];
    let archive = Darc::build(files).unwrap();
    let parsed = Darc::parse(&archive).unwrap();

    assert_eq!(parsed.files.len(), 2);
    assert_eq!(parsed.files[0].name, "a.bin");
    assert_eq!(parsed.files[0].data, &[0x01, 0x02]);
    assert_eq!(parsed.files[1].name, "b.bin");
    assert_eq!(parsed.files[1].data, &[0x03]);

    assert_eq!(parsed.get("b.bin").unwrap().data, &[0x03]);
    assert!(parsed.get("missing.bin").is_none());
}

#[test]
fn darc_total_size_is_backpatched() {
    let archive = Darc::build(&[("x", b"payload")]).unwrap();
    assert_eq!(read_u32(&archive, 0x0C) as usize, archive.len());
}

#[test]
fn darc_handles_empty_files_and_empty_archive() {
    let archive = Darc::build(&[("empty.bin", b"")]).unwrap();
    let parsed = Darc::parse(&archive).unwrap();
    assert_eq!(parsed.files[0].name, "empty.bin");
    assert!(parsed.files[0].data.is_empty());

    let empty = Darc::build(&[]).unwrap();
    assert!(Darc::parse(&empty).unwrap().files.is_empty());
}

#[test]
fn darc_rejects_bad_magic_and_bom() {
    let mut archive = Darc::build(&[("f", b"d")]).unwrap();
    archive[0] = b'D';
    assert!(matches!(Darc::parse(&archive), Err(Error::BadMagic)));

    let mut archive = Darc::build(&[("f", b"d")]).unwrap();
    archive[4] = 0x00;
    assert!(Darc::parse(&archive).is_err());
}

#[test]
fn darc_rejects_truncated_data() {
    let archive = Darc::build(&[("f.bin", b"0123456789")]).unwrap();
    assert!(Darc::parse(&archive[..archive.len() - 4]).is_err());
}

#[test]
fn bclim_trailer_layout() {
    let data = vec![0x5Au8; PixelFormat::Rgb565.byte_len(400, 240)];
    let built = Bclim {
        data: data.clone(),
        width: 400,
        height: 240,
        format: PixelFormat::Rgb565,
    }
    .build()
    .unwrap();

    assert_eq!(built.len(), data.len() + TRAILER_SIZE);
    let t = data.len();
    assert_eq!(&built[t..t + 4], b"FLIM");
    assert_eq!(&built[t + 4..t + 6], &0xFEFFu16.to_le_bytes());
    assert_eq!(read_u32(&built, t + 0x0C) as usize, built.len());
    assert_eq!(&built[t + 0x14..t + 0x18], b"imag");
    assert_eq!(&built[t + 0x1C..t + 0x1E], &400u16.to_le_bytes());
    assert_eq!(&built[t + 0x1E..t + 0x20], &240u16.to_le_bytes());
    assert_eq!(read_u32(&built, t + 0x20), 5); // RGB565 format code
    assert_eq!(read_u32(&built, t + 0x24) as usize, data.len());
}

#[test]
fn bclim_roundtrip() {
    for format in [PixelFormat::Rgba8, PixelFormat::La8, PixelFormat::Etc1] {
        let data = vec![0xC3u8; format.byte_len(32, 16)];
        let built = Bclim {
            data: data.clone(),
            width: 32,
            height: 16,
            format,
        }
        .build()
        .unwrap();
        let parsed = Bclim::parse(&built).unwrap();
        assert_eq!(parsed.width, 32);
        assert_eq!(parsed.height, 16);
        assert_eq!(parsed.format, format);
        assert_eq!(parsed.data, data);
    }
}

#[test]
fn bclim_rejects_payload_size_mismatch() {
    let short = Bclim {
        data: vec![0; 10],
        width: 32,
        height: 16,
        format: PixelFormat::La8,
    };
    assert!(matches!(short.build(), Err(Error::BadDimensions)));
}

#[test]
fn bclim_rejects_corrupt_trailer() {
    let built = Bclim {
        data: vec![0; PixelFormat::La8.byte_len(8, 8)],
        width: 8,
        height: 8,
        format: PixelFormat::La8,
    }
    .build()
    .unwrap();

    assert!(Bclim::parse(&built[..TRAILER_SIZE - 1]).is_err());

    let mut bad = built.clone();
    let t = bad.len() - TRAILER_SIZE;
    bad[t] = b'X';
    assert!(matches!(Bclim::parse(&bad), Err(Error::BadMagic)));
}
