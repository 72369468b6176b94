use f3dex2_codec::{Arg, Command, encode};

/// Builds a `Command` one argument at a time.
pub struct CommandBuilder {
    name: String,
    args: Vec<Arg>,
}

impl CommandBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            args: Vec::new(),
        }
    }

    pub fn int(mut self, value: i64) -> Self {
        self.args.push(Arg::Int(value));
        self
    }

    pub fn ints(mut self, values: &[i64]) -> Self {
        self.args.extend(values.iter().copied().map(Arg::Int));
        self
    }

    pub fn sym(mut self, text: &str) -> Self {
        self.args.push(Arg::sym(text));
        self
    }

    pub fn flags(mut self, parts: &[&str]) -> Self {
        self.args
            .push(Arg::Flags(parts.iter().map(|p| Arg::sym(*p)).collect()));
        self
    }

    pub fn arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn build(self) -> Command {
        Command::new(self.name, self.args)
    }

    /// Encodes the built command, panicking on failure.
    pub fn words(self) -> Vec<u64> {
        let command = self.build();
        encode(&command).unwrap_or_else(|e| panic!("{} failed to encode: {e}", command.name))
    }
}
