// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Tests for the segmented stream.

#[cfg(test)]
mod tests {
    use crate::stream::SegmentedStream;
    use std::io::{Read, Seek, SeekFrom, Write};

    #[test]
    fn test_empty_stream() {
        let stream = SegmentedStream::new();
        assert_eq!(stream.len(), 0);
        assert!(stream.is_empty());
        assert_eq!(stream.position(), 0);
        assert_eq!(stream.capacity(), 0);
    }

    #[test]
    fn test_chunk_size_must_be_power_of_two() {
        assert!(SegmentedStream::with_chunk_size(0).is_err());
        assert!(SegmentedStream::with_chunk_size(100).is_err());
        assert!(SegmentedStream::with_chunk_size(64).is_ok());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let mut stream = SegmentedStream::with_chunk_size(16).unwrap();
        let data: Vec<u8> = (0..100u8).collect();
        stream.write_all(&data).unwrap();
        assert_eq!(stream.len(), 100);

        stream.seek(SeekFrom::Start(0)).unwrap();
        let mut back = vec![0u8; 100];
        stream.read_exact(&mut back).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_read_clips_to_length() {
        let mut stream = SegmentedStream::with_chunk_size(16).unwrap();
        stream.write_all(&[1, 2, 3]).unwrap();
        stream.seek(SeekFrom::Start(0)).unwrap();

        let mut buf = [0u8; 10];
        let n = stream.read(&mut buf).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&buf[..3], &[1, 2, 3]);
    }

    #[test]
    fn test_read_past_length_yields_zero_bytes() {
        let mut stream = SegmentedStream::new();
        stream.write_all(&[1]).unwrap();
        stream.seek(SeekFrom::Start(50)).unwrap();

        let mut buf = [0u8; 4];
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_sparse_write_past_end() {
        let mut stream = SegmentedStream::with_chunk_size(64).unwrap();
        stream.seek(SeekFrom::Start(1_000_000)).unwrap();
        stream.write_all(&[1, 2, 3]).unwrap();
        assert_eq!(stream.len(), 1_000_003);

        // Every byte of the gap reads back as zero.
        stream.seek(SeekFrom::Start(0)).unwrap();
        let mut head = vec![0xFFu8; 128];
        stream.read_exact(&mut head).unwrap();
        assert!(head.iter().all(|&b| b == 0));

        stream.seek(SeekFrom::Start(1_000_000)).unwrap();
        let mut tail = [0u8; 3];
        stream.read_exact(&mut tail).unwrap();
        assert_eq!(tail, [1, 2, 3]);
    }

    #[test]
    fn test_write_spanning_chunks() {
        let mut stream = SegmentedStream::with_chunk_size(8).unwrap();
        stream.seek(SeekFrom::Start(5)).unwrap();
        let data: Vec<u8> = (1..=20u8).collect();
        stream.write_all(&data).unwrap();

        stream.seek(SeekFrom::Start(5)).unwrap();
        let mut back = vec![0u8; 20];
        stream.read_exact(&mut back).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_overwrite_middle() {
        let mut stream = SegmentedStream::with_chunk_size(8).unwrap();
        stream.write_all(&[9u8; 24]).unwrap();
        stream.seek(SeekFrom::Start(7)).unwrap();
        stream.write_all(&[0, 1, 2]).unwrap();
        assert_eq!(stream.len(), 24);

        let all = stream.to_vec();
        assert_eq!(&all[6..11], &[9, 0, 1, 2, 9]);
    }

    #[test]
    fn test_seek_origins() {
        let mut stream = SegmentedStream::new();
        stream.write_all(&[0u8; 10]).unwrap();

        assert_eq!(stream.seek(SeekFrom::Start(4)).unwrap(), 4);
        assert_eq!(stream.seek(SeekFrom::Current(3)).unwrap(), 7);
        assert_eq!(stream.seek(SeekFrom::Current(-7)).unwrap(), 0);
        assert_eq!(stream.seek(SeekFrom::End(-2)).unwrap(), 8);
        assert_eq!(stream.seek(SeekFrom::End(5)).unwrap(), 15);
    }

    #[test]
    fn test_seek_negative_fails() {
        let mut stream = SegmentedStream::new();
        assert!(stream.seek(SeekFrom::Current(-1)).is_err());
        assert!(stream.seek(SeekFrom::End(-1)).is_err());
        // Position is unchanged after a failed seek.
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn test_set_length_grow_is_sparse() {
        let mut stream = SegmentedStream::with_chunk_size(16).unwrap();
        stream.write_all(&[7u8; 4]).unwrap();
        stream.set_length(100);
        assert_eq!(stream.len(), 100);

        stream.seek(SeekFrom::Start(4)).unwrap();
        let mut rest = vec![0xAAu8; 96];
        stream.read_exact(&mut rest).unwrap();
        assert!(rest.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_set_length_shrink_zeroes_tail() {
        let mut stream = SegmentedStream::with_chunk_size(16).unwrap();
        stream.write_all(&[0xFFu8; 40]).unwrap();
        stream.set_length(20);
        assert_eq!(stream.len(), 20);

        // Regrow: the previously cut range must read as zeros again.
        stream.set_length(40);
        stream.seek(SeekFrom::Start(20)).unwrap();
        let mut tail = vec![0xAAu8; 20];
        stream.read_exact(&mut tail).unwrap();
        assert!(tail.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_shrink_releases_chunk_slots() {
        let mut stream = SegmentedStream::with_chunk_size(16).unwrap();
        stream.write_all(&[1u8; 16 * 64]).unwrap();
        let before = stream.capacity();
        stream.set_length(16);
        assert!(stream.capacity() < before);
        // Slot floor of 8 chunks.
        assert_eq!(stream.capacity(), 8 * 16);
    }

    #[test]
    fn test_to_vec_matches_contents() {
        let mut stream = SegmentedStream::with_chunk_size(8).unwrap();
        let data: Vec<u8> = (0..50u8).collect();
        stream.write_all(&data).unwrap();
        assert_eq!(stream.to_vec(), data);
    }
}
