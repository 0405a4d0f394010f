use anyhow::{Context, Result};

use crate::command::{CommandContext, CommandHandler, CommandRegistry};

pub fn register_builtins(registry: &mut CommandRegistry) {
    registry.register("help", Help, "Show the list of available commands");
    registry.register_fn(
        "exit",
        |_args, ctx| {
            ctx.stop();
            ctx.log("Shutting down");
        },
        "Exit the program",
    );
    registry.register_fn(
        "clear",
        |_args, ctx| {
            ctx.console.log.clear();
            ctx.log("Logs cleared");
        },
        "Clear the log",
    );
    registry.register("echo", Echo, "Print the given text");
    registry.register("add", Add, "Add two numbers: add <number1> <number2>");
}

pub struct Help;
impl CommandHandler for Help {
    fn execute(&self, _args: &[&str], ctx: &mut CommandContext<'_>) {
        let registry = ctx.registry;
        for descriptor in registry.descriptors() {
            ctx.log(format!(
                "{} -> {}",
                descriptor.verb(),
                descriptor.description()
            ));
        }
        ctx.set_status("Displayed list of available commands");
    }
}

/// Arguments are joined with single spaces and no trailing separator.
pub struct Echo;
impl CommandHandler for Echo {
    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) {
        ctx.report(format!("ECHO: {}", args.join(" ")));
    }
}

/// Sums the first two arguments as `i64`; anything past them is ignored. Overflow is
/// reported as an error rather than wrapped.
pub struct Add;
impl CommandHandler for Add {
    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) {
        let [a, b, ..] = args else {
            ctx.log("Error: command 'add' requires two numeric arguments");
            ctx.set_status("Error: insufficient arguments");
            return;
        };

        match add(a, b) {
            Ok(message) => ctx.report(message),
            Err(e) => ctx.report(format!("Error while executing command 'add': {:#}", e)),
        }
    }
}

fn add(a: &str, b: &str) -> Result<String> {
    let lhs = parse_operand(a)?;
    let rhs = parse_operand(b)?;
    let sum = lhs
        .checked_add(rhs)
        .with_context(|| format!("{} + {} overflows a 64-bit integer", lhs, rhs))?;

    Ok(format!("{} + {} = {}", lhs, rhs, sum))
}

fn parse_operand(arg: &str) -> Result<i64> {
    arg.parse::<i64>()
        .with_context(|| format!("'{}' is not an integer", arg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Console;

    fn setup() -> (CommandRegistry, Console) {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        (registry, Console::default())
    }

    fn texts(console: &Console) -> Vec<&str> {
        console.log.all().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn registers_five_commands() {
        let (registry, _) = setup();
        let verbs: Vec<_> = registry.descriptors().map(|d| d.verb()).collect();
        assert_eq!(verbs, vec!["add", "clear", "echo", "exit", "help"]);
    }

    #[test]
    fn help_lists_every_command_sorted() {
        let (registry, mut console) = setup();

        assert!(registry.dispatch("help", &mut console));

        let lines = texts(&console);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "add -> Add two numbers: add <number1> <number2>");
        assert_eq!(lines[4], "help -> Show the list of available commands");
        assert_eq!(
            console.status.visible(),
            Some("Displayed list of available commands")
        );
    }

    #[test]
    fn exit_clears_running_flag() {
        let (registry, mut console) = setup();

        registry.dispatch("exit", &mut console);

        assert!(!console.running);
        assert_eq!(texts(&console), vec!["Shutting down"]);
    }

    #[test]
    fn clear_leaves_only_notice() {
        let (registry, mut console) = setup();
        for i in 0..20 {
            console.log.append(format!("noise {i}"));
        }

        registry.dispatch("clear", &mut console);

        assert_eq!(texts(&console), vec!["Logs cleared"]);
    }

    #[test]
    fn echo_joins_without_trailing_space() {
        let (registry, mut console) = setup();

        registry.dispatch("echo a   b c", &mut console);

        assert_eq!(texts(&console), vec!["ECHO: a b c"]);
        assert_eq!(console.status.visible(), Some("ECHO: a b c"));
    }

    #[test]
    fn echo_without_args() {
        let (registry, mut console) = setup();

        registry.dispatch("echo", &mut console);

        assert_eq!(texts(&console), vec!["ECHO: "]);
    }

    #[test]
    fn add_sums_two_integers() {
        let (registry, mut console) = setup();

        registry.dispatch("add 2 3", &mut console);

        assert_eq!(texts(&console), vec!["2 + 3 = 5"]);
        assert_eq!(console.status.visible(), Some("2 + 3 = 5"));
    }

    #[test]
    fn add_handles_negatives_and_ignores_extra_args() {
        let (registry, mut console) = setup();

        registry.dispatch("add -7 3 99", &mut console);

        assert_eq!(texts(&console), vec!["-7 + 3 = -4"]);
    }

    #[test]
    fn add_with_one_arg_reports_insufficient_arguments() {
        let (registry, mut console) = setup();

        registry.dispatch("add 2", &mut console);

        assert_eq!(
            texts(&console),
            vec!["Error: command 'add' requires two numeric arguments"]
        );
        assert_eq!(console.status.visible(), Some("Error: insufficient arguments"));
    }

    #[test]
    fn add_with_non_numeric_arg_reports_parse_error() {
        let (registry, mut console) = setup();

        registry.dispatch("add x y", &mut console);

        let lines = texts(&console);
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            "Error while executing command 'add': 'x' is not an integer: invalid digit found in string"
        );
        assert_eq!(console.status.visible(), Some(lines[0]));
    }

    #[test]
    fn add_rejects_trailing_garbage() {
        let (registry, mut console) = setup();

        registry.dispatch("add 12abc 1", &mut console);

        assert!(texts(&console)[0].contains("'12abc' is not an integer"));
    }

    #[test]
    fn add_reports_overflow() {
        let (registry, mut console) = setup();

        registry.dispatch(&format!("add {} 1", i64::MAX), &mut console);

        assert_eq!(
            texts(&console),
            vec![format!(
                "Error while executing command 'add': {} + 1 overflows a 64-bit integer",
                i64::MAX
            )]
        );
    }
}
