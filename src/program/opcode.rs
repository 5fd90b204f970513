// Instruction set of the tape machine

/// The eight instructions, plus a catch-all for comment characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    MoveRight,
    MoveLeft,
    Increment,
    Decrement,
    Output,
    Input,
    LoopStart,
    LoopEnd,
    Comment,
}

impl Opcode {
    /// Decode a program character. Anything unrecognized is a comment.
    pub fn from_char(c: char) -> Self {
        match c {
            '>' => Opcode::MoveRight,
            '<' => Opcode::MoveLeft,
            '+' => Opcode::Increment,
            '-' => Opcode::Decrement,
            '.' => Opcode::Output,
            ',' => Opcode::Input,
            '[' => Opcode::LoopStart,
            ']' => Opcode::LoopEnd,
            _ => Opcode::Comment,
        }
    }

    /// The character this opcode is written as, if it is not a comment
    pub fn symbol(self) -> Option<char> {
        match self {
            Opcode::MoveRight => Some('>'),
            Opcode::MoveLeft => Some('<'),
            Opcode::Increment => Some('+'),
            Opcode::Decrement => Some('-'),
            Opcode::Output => Some('.'),
            Opcode::Input => Some(','),
            Opcode::LoopStart => Some('['),
            Opcode::LoopEnd => Some(']'),
            Opcode::Comment => None,
        }
    }
}
