//! # Partition Table Tests
//!
//! First-fit selection, wait-queue reservations, and bootstrap placement.

use ossim_core::config::MemoryConfig;
use ossim_core::memory::{Occupant, PartitionTable};
use ossim_core::process::{Pcb, WaitQueue};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_default_layout() {
    let table = PartitionTable::default();
    let capacities: Vec<u32> = table.iter().map(|p| p.capacity).collect();
    assert_eq!(capacities, vec![40, 25, 15, 10, 8, 2]);
    assert!(table.iter().all(|p| p.occupant == Occupant::Empty));
    assert_eq!(table.get(1).map(|p| p.number), Some(1));
    assert!(table.get(0).is_none());
    assert!(table.get(7).is_none());
}

#[test]
fn test_from_config() {
    let table = PartitionTable::from_config(&MemoryConfig {
        partitions: vec![5, 3],
    });
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(2).map(|p| p.capacity), Some(3));
}

#[rstest]
#[case(1, Some(1))]
#[case(40, Some(1))]
#[case(41, None)]
fn test_first_fit_on_empty_table(#[case] size: u32, #[case] expected: Option<usize>) {
    let table = PartitionTable::default();
    assert_eq!(table.find_available_partition(size, &WaitQueue::new()), expected);
}

#[test]
fn test_first_fit_skips_occupied_partitions() {
    let mut table = PartitionTable::default();
    table.occupy(1, "init");
    table.occupy(2, "editor");
    assert_eq!(table.find_available_partition(10, &WaitQueue::new()), Some(3));
    assert_eq!(table.find_available_partition(20, &WaitQueue::new()), None);
}

#[test]
fn test_first_fit_skips_partitions_held_by_waiting_processes() {
    let table = PartitionTable::new(&[10, 10]);
    let queue: WaitQueue = [Pcb::new(0, None, "init", 1).placed_in(1)]
        .into_iter()
        .collect();
    assert_eq!(table.find_available_partition(5, &queue), Some(2));
}

#[test]
fn test_free_makes_partition_available_again() {
    let mut table = PartitionTable::new(&[10]);
    table.occupy(1, "init");
    assert!(!table.is_free(1));
    table.free(1);
    assert!(table.is_free(1));
    assert_eq!(table.find_available_partition(10, &WaitQueue::new()), Some(1));
}

#[test]
fn test_occupy_out_of_range_is_ignored() {
    let mut table = PartitionTable::new(&[10]);
    let before = table.clone();
    table.occupy(2, "ghost");
    table.free(0);
    assert_eq!(table, before);
}

#[test]
fn test_allocate_memory_places_pcb() {
    let mut table = PartitionTable::default();
    let mut pcb = Pcb::new(0, None, "init", 1);

    assert_eq!(table.allocate_memory(&mut pcb), Some(1));
    assert_eq!(pcb.partition, Some(1));
    assert_eq!(
        table.get(1).map(|p| p.occupant.clone()),
        Some(Occupant::Program("init".into()))
    );
    assert_eq!(table.get(1).map(|p| p.occupant.to_string()), Some("init".into()));
    assert_eq!(table.get(2).map(|p| p.occupant.to_string()), Some("empty".into()));
}

#[test]
fn test_allocate_memory_failure_leaves_pcb_unplaced() {
    let mut table = PartitionTable::new(&[2, 2]);
    let mut pcb = Pcb::new(0, None, "big", 3);

    assert_eq!(table.allocate_memory(&mut pcb), None);
    assert_eq!(pcb.partition, None);
    assert!(table.is_free(1) && table.is_free(2));
}
