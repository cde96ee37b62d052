//! Hello World demo.
//!
//! Builds a complete memory image (interrupt handlers, vector table, startup
//! code and a program), then runs it with output going to stdout.
//!
//! The program copies "Hello World!\n" into the zero page one character at a
//! time, then prints it by raising interrupt 1 once per character with the
//! character in X. It finishes by raising interrupt 255, whose handler jumps
//! to itself until the cycle budget runs out.
//!
//! Run with `cargo run --example hello_world`. Pass `--listing` to print a
//! disassembly of the program before it runs.

use vm6502::interrupts::{HALT, INVALID_OPCODE, USER_0, USER_1};
use vm6502::{disassemble, vector_address, AddressSpace, StdoutDevice, CPU, STARTUP_ADDRESS};

const MESSAGE: &[u8] = b"Hello World!\n";
const PROGRAM_START: u16 = 0x0100;
const BUDGET: u32 = 2_000;

/// Interrupt handlers and the vector entries that point at them.
fn load_handlers(cpu: &mut CPU<AddressSpace>) -> Result<(), Box<dyn std::error::Error>> {
    // Slot 0: LDA #$69 ; RTI
    cpu.load_image(0xF100, &[0xA9, 0x69, 0x40])?;
    // Slot 1: STX $FFFF ; RTI
    cpu.load_image(0xF103, &[0x8E, 0xFF, 0xFF, 0x40])?;
    // Slot 255: JMP $F107
    cpu.load_image(0xF107, &[0x4C, 0xF1, 0x07])?;
    // Slot 5: print "Invalid opcode\n", preserving Y
    cpu.load_image(
        0xF10B,
        &[
            0x98, //             TYA
            0x48, //             PHA
            0xA0, 0x00, //       LDY #$00
            0xBE, 0xF1, 0x50, // LDX $F150,Y
            0x8E, 0xFF, 0xFF, // STX $FFFF
            0xC8, //             INY
            0xC0, 0x0F, //       CPY #$0F
            0xD0, 0xF5, //       BNE -11
            0x68, //             PLA
            0xA8, //             TAY
            0x40, //             RTI
        ],
    )?;
    cpu.load_image(0xF150, b"Invalid opcode\n")?;

    for (slot, handler) in [
        (USER_0, 0xF100u16),
        (USER_1, 0xF103),
        (INVALID_OPCODE, 0xF10B),
        (HALT, 0xF107),
    ] {
        cpu.load_image(vector_address(slot), &handler.to_be_bytes())?;
    }
    Ok(())
}

/// The user program, assembled at `PROGRAM_START`.
fn program() -> Vec<u8> {
    let mut code = Vec::new();

    // LDA #c ; STA $i
    for (i, &c) in MESSAGE.iter().enumerate() {
        code.extend_from_slice(&[0xA9, c, 0x85, i as u8]);
    }

    code.extend_from_slice(&[
        0xA0, 0x00, //               LDY #$00
        0xB6, 0x00, //       loop:   LDX $00,Y
        0xA9, USER_1, //             LDA #1
        0x00, //                     BRK
        0xC8, //                     INY
        0xC0, MESSAGE.len() as u8, // CPY #len
        0xD0, 0xF6, //               BNE loop
        0xA9, HALT, //               LDA #$FF
        0x00, //                     BRK
    ]);
    code
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cpu = CPU::new(AddressSpace::new());

    load_handlers(&mut cpu)?;
    // JMP $0100
    cpu.load_image(STARTUP_ADDRESS as u32, &[0x4C, 0x01, 0x00])?;

    let code = program();
    cpu.load_image(PROGRAM_START as u32, &code)?;

    if std::env::args().any(|arg| arg == "--listing") {
        for instr in disassemble(&code, PROGRAM_START) {
            println!("{:04X}  {}", instr.address, instr);
        }
        println!();
    }

    cpu.set_output(StdoutDevice::new());
    let summary = cpu.execute(BUDGET)?;

    eprintln!(
        "{} instructions, {} cycles, stopped at PC 0x{:04X}",
        summary.instructions,
        summary.cycles_used,
        cpu.pc()
    );
    Ok(())
}
