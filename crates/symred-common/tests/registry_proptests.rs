//! Property tests for the mode registries and error rendering.

use proptest::prelude::*;
use symred_common::{ALLOWED_MODES, BackendError, Device, Grid, MemoryLocation, Registry};

fn round_trips<R: Registry>(tag: u8) -> Result<(), TestCaseError> {
    match R::from_tag(tag) {
        Some(value) => {
            prop_assert_eq!(value.tag(), tag);
            prop_assert_eq!(R::from_label(value.label()), Some(value));
        }
        None => prop_assert!(usize::from(tag) >= R::ENTRIES.len()),
    }
    Ok(())
}

proptest! {
    #[test]
    fn tag_label_round_trip(tag in any::<u8>()) {
        round_trips::<Device>(tag)?;
        round_trips::<Grid>(tag)?;
        round_trips::<MemoryLocation>(tag)?;
    }
}

proptest! {
    #[test]
    fn unknown_labels_are_rejected(label in "[a-zA-Z0-9_]{0,12}") {
        let known = ["CPU", "GPU", "1D", "2D", "host", "device"];
        prop_assume!(!known.contains(&label.as_str()));
        prop_assert_eq!(Device::from_label(&label), None);
        prop_assert_eq!(Grid::from_label(&label), None);
        prop_assert_eq!(MemoryLocation::from_label(&label), None);
    }
}

#[test]
fn registry_labels_in_order() {
    assert_eq!(Device::labels(), vec!["CPU", "GPU"]);
    assert_eq!(Grid::labels(), vec!["1D", "2D"]);
    assert_eq!(MemoryLocation::labels(), vec!["host", "device"]);
}

#[test]
fn error_messages_snapshot() {
    let invalid =
        BackendError::InvalidArgument { mode: "TPU".to_string(), allowed: ALLOWED_MODES };
    insta::assert_snapshot!(
        invalid.to_string(),
        @r#"Invalid backend 'TPU'. Should be one of ["auto", "CPU", "GPU", "GPU_1D", "GPU_1D_device", "GPU_1D_host", "GPU_2D", "GPU_2D_device", "GPU_2D_host"]"#
    );

    let mixed = BackendError::InconsistentLocation { on_device: 2, on_host: 1 };
    insta::assert_snapshot!(
        mixed.to_string(),
        @"Variables have different memory locations: 2 on device, 1 on host"
    );
}
