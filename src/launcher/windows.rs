use std::os::windows::process::CommandExt;
use std::process::Command;

/// `CREATE_NO_WINDOW`: run console programs without allocating a visible console.
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

pub(super) fn hide_window(command: &mut Command) {
    command.creation_flags(CREATE_NO_WINDOW);
}
