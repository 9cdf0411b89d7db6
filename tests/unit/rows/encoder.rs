use super::*;

fn header(top: u32, height: u32) -> TimelineEntry {
    TimelineEntry {
        top,
        height,
        kind: EntryKind::Header,
    }
}

fn body(top: u32, height: u32, colors: [u8; 4]) -> TimelineEntry {
    TimelineEntry {
        top,
        height,
        kind: EntryKind::Body { colors },
    }
}

#[test]
fn text_words_pack_four_indices_high_to_low() {
    let word = RowKind::Text([1, 2, 3, 4]).to_wire().unwrap();
    assert_eq!(word, (1 << 9) | (2 << 6) | (3 << 3) | 4);
    assert_eq!(RowKind::from_wire(word).unwrap(), RowKind::Text([1, 2, 3, 4]));
}

#[test]
fn header_words_carry_the_flag() {
    let word = RowKind::Header { offset: 42 }.to_wire().unwrap();
    assert_eq!(word, HEADER_FLAG | 42);
    assert_eq!(
        RowKind::from_wire(word).unwrap(),
        RowKind::Header { offset: 42 }
    );
}

#[test]
fn palette_index_past_the_table_is_rejected() {
    let err = RowKind::Text([0, 8, 0, 0]).to_wire().unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn uncovered_rows_use_default_columns() {
    let rows = encode_rows(&[], 4, 95).unwrap();
    assert_eq!(rows.len(), 4);
    for row in rows.rows() {
        assert_eq!(row.kind, RowKind::Text(DEFAULT_COLUMNS));
        assert_eq!(row.prior_header, None);
    }
    assert!(rows.prior_header_words().unwrap().iter().all(|&w| w == NO_PRIOR_HEADER));
}

#[test]
fn body_rows_measure_distance_to_the_header_above() {
    let entries = [header(2, 3), body(5, 4, [0, 1, 2, 3])];
    let rows = encode_rows(&entries, 10, 95).unwrap();

    assert_eq!(rows.rows()[0].prior_header, None);
    assert_eq!(rows.rows()[2].kind, RowKind::Header { offset: 0 });
    assert_eq!(rows.rows()[4].kind, RowKind::Header { offset: 2 });
    assert_eq!(rows.rows()[5].kind, RowKind::Text([0, 1, 2, 3]));
    assert_eq!(rows.rows()[5].prior_header, Some(3));
    assert_eq!(rows.rows()[9].kind, RowKind::Text(DEFAULT_COLUMNS));
    assert_eq!(rows.rows()[9].prior_header, Some(7));
}

#[test]
fn header_wins_over_body() {
    let entries = [body(0, 10, [5, 5, 5, 5]), header(3, 2)];
    let rows = encode_rows(&entries, 10, 95).unwrap();
    assert_eq!(rows.rows()[3].kind, RowKind::Header { offset: 0 });
    assert_eq!(rows.rows()[5].kind, RowKind::Text([5, 5, 5, 5]));
}

#[test]
fn overlapping_headers_resolve_to_the_nearer_one() {
    // Second header starts 5 rows before the first one ends.
    let entries = [header(20, 10), header(0, 10), header(5, 10)];
    let rows = encode_rows(&entries, 30, 95).unwrap();

    for y in 5..10u32 {
        assert_eq!(
            rows.rows()[y as usize].kind,
            RowKind::Header { offset: y - 5 }
        );
        assert_eq!(rows.rows()[y as usize].prior_header, Some(y - 5));
    }
    assert_eq!(rows.rows()[4].kind, RowKind::Header { offset: 4 });
}

#[test]
fn entries_past_the_end_are_clipped() {
    let rows = encode_rows(&[header(8, 5)], 10, 95).unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows.rows()[9].kind, RowKind::Header { offset: 1 });
}

#[test]
fn header_taller_than_the_sprite_is_rejected() {
    let err = encode_rows(&[header(0, 96)], 200, 95).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn wire_arrays_are_index_aligned_and_reversible() {
    let entries = [header(1, 3), body(4, 2, [1, 1, 2, 2])];
    let rows = encode_rows(&entries, 8, 95).unwrap();
    let prior = rows.prior_header_words().unwrap();
    let info = rows.row_info_words().unwrap();
    assert_eq!(prior.len(), info.len());
    assert_eq!(RowArrays::from_wire(&prior, &info).unwrap(), rows);
}

#[test]
fn mismatched_wire_arrays_are_rejected() {
    assert!(RowArrays::from_wire(&[0, 1], &[0]).is_err());
}

#[test]
fn distance_reaching_the_sentinel_is_rejected() {
    let rows = RowArrays::new(vec![RowData {
        prior_header: Some(NO_PRIOR_HEADER),
        kind: RowKind::Text(DEFAULT_COLUMNS),
    }]);
    assert!(rows.prior_header_words().unwrap_err().is_configuration());
}
