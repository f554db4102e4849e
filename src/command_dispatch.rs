//! Purpose: Hold top-level CLI command dispatch for `i3reply`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Every command except `completion` reads exactly one reply document.
//! Invariants: Helpers in `main.rs` remain the source of output formatting.

use super::*;

use i3ipc_reply::api::{Primitive, Value as ReplyValue};

pub(super) fn dispatch_command(command: Command, color_mode: ColorMode) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "i3reply", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Show { input } => {
            let reply = read_reply(input.as_ref())?;
            emit_text(reply.to_text(), || reply.to_colored_text(), color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Get { path, input } => {
            let reply = read_reply(input.as_ref())?;
            let value = reply.lookup(&path)?;
            emit_value(value, color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Check { input } => {
            let reply = read_reply(input.as_ref())?;
            if reply.success() {
                Ok(RunOutcome::ok())
            } else {
                emit_reply_failure(&reply, color_mode);
                Ok(RunOutcome::with_code(REPLY_FAILURE_EXIT))
            }
        }
        Command::Json { input, pretty } => {
            let reply = read_reply(input.as_ref())?;
            let value = Value::Object(reply.into_mapping());
            let encoded = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            }
            .map_err(|err| {
                Error::new(ErrorKind::Internal)
                    .with_message("json encode failed")
                    .with_source(err)
            })?;
            println!("{encoded}");
            Ok(RunOutcome::ok())
        }
        Command::Keys { input } => {
            let reply = read_reply(input.as_ref())?;
            for name in reply.attribute_names() {
                println!("{name}");
            }
            Ok(RunOutcome::ok())
        }
    }
}

fn emit_value(value: &ReplyValue, color_mode: ColorMode) {
    match value {
        ReplyValue::Primitive(Primitive::String(text)) => println!("{text}"),
        _ => emit_text(value.to_text(), || value.to_colored_text(), color_mode),
    }
}
