use crate::Error;

use super::FrequencyTable;

#[test]
fn test_empty_input_gives_empty_table() {
    let table = FrequencyTable::from_bytes(&[]).unwrap();

    assert!(table.is_empty());
    assert_eq!(table.total(), 0);
}

#[test]
fn test_counts_in_ascending_symbol_order() {
    let table = FrequencyTable::from_bytes(b"banana").unwrap();

    assert_eq!(table.iter().collect::<Vec<_>>(), vec![(b'a', 3), (b'b', 1), (b'n', 2)]);
    assert_eq!(table.frequency(b'n'), Some(2));
    assert_eq!(table.frequency(b'z'), None);
    assert_eq!(table.total(), 6);
}

#[test]
fn test_all_byte_values() {
    let data: Vec<u8> = (0..=255).collect();
    let table = FrequencyTable::from_bytes(&data).unwrap();

    assert_eq!(table.len(), 256);
    assert!(table.iter().all(|(_, f)| f == 1));
}

#[test]
fn test_entries_keep_given_order() {
    let table = FrequencyTable::from_entries(vec![(9, 1), (3, 4), (200, 2)]).unwrap();

    assert_eq!(table.iter().map(|(s, _)| s).collect::<Vec<_>>(), vec![9, 3, 200]);
}

#[test]
fn test_repeated_symbol_is_rejected() {
    let res = FrequencyTable::from_entries(vec![(7, 1), (7, 2)]);

    assert!(matches!(res, Err(Error::MalformedHeader(_))));
}

#[test]
fn test_filler_after_single_symbol() {
    let table = FrequencyTable::from_bytes(&[0x41; 10]).unwrap().with_filler();

    assert_eq!(table.iter().collect::<Vec<_>>(), vec![(0x41, 10), (0x00, 0)]);
    assert_eq!(table.total(), 10);
}

#[test]
fn test_filler_avoids_zero_byte_collision() {
    let table = FrequencyTable::from_bytes(&[0x00; 3]).unwrap().with_filler();

    assert_eq!(table.iter().collect::<Vec<_>>(), vec![(0x00, 3), (0x01, 0)]);
}

#[test]
fn test_filler_not_added_to_larger_tables() {
    let table = FrequencyTable::from_bytes(b"ab").unwrap();

    assert_eq!(table.with_filler(), table);
    assert!(FrequencyTable::default().with_filler().is_empty());
}
