mod support;

mod tests {
    use embassy_time::Instant;
    use starlight_headliner::ir::DecoderState;
    use starlight_headliner::ir::timing::{
        HEADER_MARK_US, REPEAT_SPACE_US, lower_25_percent, lower_50_percent, upper_25_percent,
        upper_50_percent, within_25_percent, within_50_percent,
    };
    use starlight_headliner::{IrDecoder, IrFlags, Level};

    use crate::support::{feed, frame_edges, nec_word};

    #[test]
    fn test_tolerance_windows() {
        assert_eq!(lower_25_percent(8960), 6720);
        assert_eq!(upper_25_percent(8960), 11200);
        assert_eq!(lower_50_percent(560), 280);
        assert_eq!(upper_50_percent(1680), 2520);

        assert!(within_25_percent(6720, 8960));
        assert!(within_25_percent(11200, 8960));
        assert!(!within_25_percent(6719, 8960));
        assert!(!within_25_percent(11201, 8960));
        assert!(within_50_percent(280, 560));
        assert!(!within_50_percent(841, 560));
    }

    #[test]
    fn test_valid_frame_emits_once() {
        let mut decoder = IrDecoder::new();
        let frames = feed(&mut decoder, &frame_edges(0x00, 24));

        assert_eq!(frames.len(), 1);
        let frame = frames[0];
        assert_eq!(frame.address, 0x00);
        assert_eq!(frame.command, 24);
        assert_eq!(frame.address_complement(), 0xFF);
        assert_eq!(frame.command_complement(), !24);
        assert_eq!(frame.raw, nec_word(0x00, 24));
        assert_eq!(frame.flags, IrFlags::EMPTY);
        assert_eq!(decoder.state(), DecoderState::WaitingForStartMark);
    }

    #[test]
    fn test_frames_back_to_back() {
        let mut decoder = IrDecoder::new();
        let mut edges = frame_edges(0x12, 69);
        edges.extend(frame_edges(0x34, 82));

        let frames = feed(&mut decoder, &edges);
        let commands: Vec<u8> = frames.iter().map(|frame| frame.command).collect();
        assert_eq!(commands, [69, 82]);
        assert_eq!(frames[1].address, 0x34);
    }

    #[test]
    fn test_jitter_at_window_bounds() {
        let mut edges = frame_edges(0xA5, 90);
        // header mark and space at the 25 % bounds
        edges[1].1 = 6720;
        edges[2].1 = 5600;
        for (i, edge) in edges.iter_mut().enumerate().skip(3) {
            match (edge.0, i % 4) {
                // bit marks alternate between both 50 % bounds
                (Level::High, 3) => edge.1 = 280,
                (Level::High, _) => edge.1 = 840,
                // ones as short as allowed, zeros as long as allowed
                (Level::Low, _) if edge.1 > 1000 => edge.1 = 1120,
                (Level::Low, _) => edge.1 = 1119,
            }
        }

        let mut decoder = IrDecoder::new();
        let frames = feed(&mut decoder, &edges);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].command, 90);
        assert_eq!(frames[0].address, 0xA5);
    }

    #[test]
    fn test_any_single_bad_pulse_drops_frame() {
        let edges = frame_edges(0x00, 28);
        for position in 1..edges.len() {
            let mut broken = edges.clone();
            broken[position].1 = match position {
                1 => 5_000,
                2 => 3_000,
                _ => match broken[position].0 {
                    Level::High => 900,
                    Level::Low => 3_000,
                },
            };

            let mut decoder = IrDecoder::new();
            let frames = feed(&mut decoder, &broken);
            assert!(frames.is_empty(), "frame decoded with bad pulse at {position}");
            assert_eq!(decoder.state(), DecoderState::WaitingForStartMark);
        }
    }

    #[test]
    fn test_truncated_frame_is_discarded() {
        let edges = frame_edges(0x00, 28);
        let mut decoder = IrDecoder::new();
        assert!(feed(&mut decoder, &edges[..edges.len() - 9]).is_empty());

        // silence, then a fresh frame
        let frames = feed(&mut decoder, &frame_edges(0x00, 21));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].command, 21);
    }

    #[test]
    fn test_long_space_resyncs_mid_frame() {
        let edges = frame_edges(0x00, 7);
        let mut decoder = IrDecoder::new();
        feed(&mut decoder, &edges[..20]);
        assert_eq!(decoder.state(), DecoderState::WaitingForDataMark);

        decoder.advance(Level::Low, 2 * HEADER_MARK_US + 1);
        assert_eq!(decoder.state(), DecoderState::WaitingForStartSpace);

        // the new mark is the header of the next frame
        let frames = feed(&mut decoder, &edges[1..]);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].command, 7);
    }

    #[test]
    fn test_repeat_frame_reuses_last_command() {
        let mut decoder = IrDecoder::new();
        feed(&mut decoder, &frame_edges(0x00, 24));

        let repeat = [
            (Level::Low, 40_000),
            (Level::High, HEADER_MARK_US),
            (Level::Low, REPEAT_SPACE_US),
            (Level::High, 560),
        ];
        let frames = feed(&mut decoder, &repeat);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].command, 24);
        assert!(frames[0].flags.is_repeat());
        assert_eq!(decoder.state(), DecoderState::WaitingForStartMark);

        // a following full frame is fresh again
        let frames = feed(&mut decoder, &frame_edges(0x00, 82));
        assert!(!frames[0].flags.is_repeat());
    }

    fn repeat_burst() -> [(Level, u32); 4] {
        [
            (Level::Low, 40_000),
            (Level::High, HEADER_MARK_US),
            (Level::Low, REPEAT_SPACE_US),
            (Level::High, 560),
        ]
    }

    #[test]
    fn test_repeat_after_rejected_stop_mark_is_ignored() {
        let mut edges = frame_edges(0x00, 24);
        if let Some(stop) = edges.last_mut() {
            stop.1 = 900;
        }

        let mut decoder = IrDecoder::new();
        assert!(feed(&mut decoder, &edges).is_empty());
        assert_eq!(decoder.bit_counter(), 32);

        assert!(feed(&mut decoder, &repeat_burst()).is_empty());
        assert_eq!(decoder.state(), DecoderState::WaitingForStartMark);
    }

    #[test]
    fn test_repeat_after_broken_frame_does_not_replay_older_frame() {
        let mut decoder = IrDecoder::new();
        assert_eq!(feed(&mut decoder, &frame_edges(0x00, 24)).len(), 1);

        let mut broken = frame_edges(0x00, 82);
        broken[20].1 = 3_000;
        assert!(feed(&mut decoder, &broken).is_empty());

        assert!(feed(&mut decoder, &repeat_burst()).is_empty());
    }

    #[test]
    fn test_repeat_can_follow_repeat() {
        let mut decoder = IrDecoder::new();
        feed(&mut decoder, &frame_edges(0x00, 90));

        for _ in 0..3 {
            let frames = feed(&mut decoder, &repeat_burst());
            assert_eq!(frames.len(), 1);
            assert_eq!(frames[0].command, 90);
            assert!(frames[0].flags.is_repeat());
        }
    }

    #[test]
    fn test_repeat_without_previous_frame_is_ignored() {
        let mut decoder = IrDecoder::new();
        let repeat = [
            (Level::Low, 40_000),
            (Level::High, HEADER_MARK_US),
            (Level::Low, REPEAT_SPACE_US),
            (Level::High, 560),
        ];
        assert!(feed(&mut decoder, &repeat).is_empty());
        assert_eq!(decoder.state(), DecoderState::WaitingForStartMark);
    }

    #[test]
    fn test_on_level_change_uses_timestamps() {
        let mut decoder = IrDecoder::new();
        let mut now = 1_000_000u64;
        let mut frames = Vec::new();
        for (level, elapsed) in frame_edges(0x00, 64) {
            now += u64::from(elapsed);
            if let Some(frame) = decoder.on_level_change(level, Instant::from_micros(now)) {
                frames.push(frame);
            }
        }
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].command, 64);
    }
}
