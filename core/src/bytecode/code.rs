use core::fmt;

use hashbrown::{HashMap, HashSet};

use crate::{String, Vec, bytecode::Instruction, format};

/// Bytecode of one function (or of the top-level program, or of a class
/// body) together with the metadata a consumer needs to run it.
#[derive(Clone, PartialEq)]
pub struct FunctionCode {
    name: String,
    arity: usize,
    frame_size: usize,
    /// Names referenced by `GLoad`/`GStore`/`RawString`.
    names: Vec<String>,
    name_map: HashMap<String, usize>,
    instructions: Vec<Instruction>,
}

impl FunctionCode {
    pub fn new(name: impl Into<String>, arity: usize, frame_size: usize) -> Self {
        Self {
            name: name.into(),
            arity,
            frame_size,
            names: Vec::new(),
            name_map: HashMap::new(),
            instructions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Number of frame slots for parameters and locals.
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Index of `name` in this function's name table, adding it if needed.
    pub fn runtime_index(&mut self, name: &str) -> usize {
        if let Some(&index) = self.name_map.get(name) {
            return index;
        }
        let index = self.names.len();
        self.names.push(String::from(name));
        self.name_map.insert(String::from(name), index);
        index
    }

    // === Sink ===

    pub fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn iconst(&mut self, index: u32) {
        self.emit(Instruction::IConst(index));
    }

    pub fn fconst(&mut self, index: u32) {
        self.emit(Instruction::FConst(index));
    }

    pub fn sconst(&mut self, index: u32) {
        self.emit(Instruction::SConst(index));
    }

    pub fn load(&mut self, index: u32) {
        self.emit(Instruction::Load(index));
    }

    pub fn store(&mut self, index: u32) {
        self.emit(Instruction::Store(index));
    }

    pub fn cload(&mut self, index: u32) {
        self.emit(Instruction::CLoad(index));
    }

    pub fn cstore(&mut self, index: u32) {
        self.emit(Instruction::CStore(index));
    }

    pub fn gload(&mut self, index: u32) {
        self.emit(Instruction::GLoad(index));
    }

    pub fn gstore(&mut self, index: u32) {
        self.emit(Instruction::GStore(index));
    }

    pub fn raw_string(&mut self, index: u32) {
        self.emit(Instruction::RawString(index));
    }

    // === Jumps ===

    /// Reserve room for a jump and return its address.
    pub fn jump_placeholder(&mut self) -> usize {
        let placeholder_index = self.instructions.len();
        self.emit(Instruction::Nop);
        placeholder_index
    }

    /// The address of the next instruction (for use as a jump label).
    pub fn label(&self) -> usize {
        self.instructions.len()
    }

    /// Replace the placeholder at `placeholder_index` with a jump to
    /// `target_label`. Returns `None` if the offset does not fit.
    pub fn patch_jump<F>(
        &mut self,
        placeholder_index: usize,
        target_label: usize,
        make_jump: F,
    ) -> Option<()>
    where
        F: FnOnce(i32) -> Instruction,
    {
        // Jumps are relative to the next instruction.
        let offset = target_label as i64 - placeholder_index as i64 - 1;
        let offset = i32::try_from(offset).ok()?;
        let slot = self.instructions.get_mut(placeholder_index)?;
        *slot = make_jump(offset);
        Some(())
    }
}

impl fmt::Debug for FunctionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FunctionCode {{")?;
        writeln!(f, "  name: {}", self.name)?;
        writeln!(f, "  arity: {}", self.arity)?;
        writeln!(f, "  frame_size: {}", self.frame_size)?;

        if !self.names.is_empty() {
            writeln!(f, "  names: [")?;
            for (i, name) in self.names.iter().enumerate() {
                writeln!(f, "    [{}] = {}", i, name)?;
            }
            writeln!(f, "  ]")?;
        } else {
            writeln!(f, "  names: []")?;
        }

        // First pass: collect jump targets so they can be labelled
        let target_of = |addr: usize, offset: i32| addr as i64 + 1 + i64::from(offset);
        let mut jump_targets: HashSet<i64> = HashSet::new();
        for (addr, instr) in self.instructions.iter().enumerate() {
            if let Some(offset) = instr.jump_offset() {
                jump_targets.insert(target_of(addr, offset));
            }
        }

        // Label numbers follow address order
        let mut sorted_targets: Vec<_> = jump_targets.into_iter().collect();
        sorted_targets.sort();
        let label_map: HashMap<i64, usize> = sorted_targets
            .into_iter()
            .enumerate()
            .map(|(i, addr)| (addr, i))
            .collect();

        writeln!(f, "  instructions:")?;
        for (addr, instr) in self.instructions.iter().enumerate() {
            let label_prefix = label_map
                .get(&(addr as i64))
                .map(|l| format!("L{}:", l))
                .unwrap_or_default();

            if let Some(offset) = instr.jump_offset() {
                let target = target_of(addr, offset);
                let target_label = label_map
                    .get(&target)
                    .map(|l| format!("L{}", l))
                    .unwrap_or_else(|| format!("@{}", target));
                writeln!(
                    f,
                    "    {:4} {:>4}  {:?} (to {})",
                    addr, label_prefix, instr, target_label
                )?;
            } else {
                writeln!(f, "    {:4} {:>4}  {:?}", addr, label_prefix, instr)?;
            }
        }
        // A jump to the end of the code lands just past the last instruction
        if let Some(label) = label_map.get(&(self.instructions.len() as i64)) {
            writeln!(f, "    {:4} {:>4}", self.instructions.len(), format!("L{}:", label))?;
        }

        write!(f, "}}")
    }
}
