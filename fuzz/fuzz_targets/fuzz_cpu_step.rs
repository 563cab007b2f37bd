//! Fuzz target for CPU execution.
//!
//! Builds an arbitrary register file and memory image on either layout, then
//! runs a bounded number of clocks looking for panics or broken invariants.

#![no_main]

use arbitrary::Arbitrary;
use nes6502::{
    AddressSpace, BreakMode, CpuConfig, ExecutionError, FlatMirrored, InvalidOpcodePolicy,
    SegmentedMap, CPU,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
    status: u8,
}

#[derive(Debug, Arbitrary)]
enum Layout {
    Flat,
    Segmented,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    layout: Layout,
    skip_invalid: bool,
    brk_interrupts: bool,
    /// Copied to memory starting at PC
    program: Vec<u8>,
    /// Clock budget, kept small so each input stays fast
    clocks: u16,
    nmi_at: Option<u16>,
}

fn run<M: AddressSpace>(memory: M, input: &FuzzInput) {
    let config = CpuConfig::default()
        .with_invalid_opcode(if input.skip_invalid {
            InvalidOpcodePolicy::Skip
        } else {
            InvalidOpcodePolicy::Halt
        })
        .with_break_mode(if input.brk_interrupts {
            BreakMode::Interrupt
        } else {
            BreakMode::Halt
        });

    let mut cpu = CPU::with_config(memory, config);
    let state = &input.cpu_state;
    cpu.memory_mut().load(state.pc, &input.program);
    cpu.set_pc(state.pc);
    cpu.set_a(state.a);
    cpu.set_x(state.x);
    cpu.set_y(state.y);
    cpu.set_sp(state.sp);
    cpu.state_mut().set_status_byte(state.status);

    let clocks = input.clocks.min(4096) as u64;
    for clock in 0..clocks {
        if input.nmi_at == Some(clock as u16) {
            cpu.nmi();
        }
        match cpu.tick() {
            Ok(()) => {}
            Err(ExecutionError::InvalidOpcode { .. }) => {
                // The error is only reachable under the halting policy
                assert!(!input.skip_invalid);
                assert!(cpu.is_halted());
                break;
            }
        }
        assert!(cpu.remaining_cycles() >= 0);
        if cpu.is_halted() {
            break;
        }
    }

    let _ = nes6502::trace_line(&cpu);
}

fuzz_target!(|input: FuzzInput| {
    if input.program.len() > 0x1_0000 {
        return;
    }

    match input.layout {
        Layout::Flat => run(FlatMirrored::new(), &input),
        Layout::Segmented => run(SegmentedMap::new(), &input),
    }
});
