use i8080_asm::{assemble, assemble_program};
use pretty_assertions::assert_eq;

#[test]
fn jmp_forward_scenario() {
    let src = ["JMP TARGET", "NOP", "TARGET: HLT"];
    assert_eq!(assemble(src).unwrap(), vec![0xC3, 0x04, 0x00, 0x00, 0x76]);
}

#[test]
fn label_addresses_round_trip_little_endian() {
    // enough padding that `far` lands above 0xFF
    let mut src: Vec<String> = vec!["JMP far".into(), "CALL back".into(), "back: NOP".into()];
    for _ in 0..0x119 {
        src.push("NOP".into());
    }
    src.push("far: LXI H,back".into());
    src.push("JNZ far".into());

    let p = assemble_program(src).unwrap();
    let far = p.symbols.get("far").unwrap();
    let back = p.symbols.get("back").unwrap();
    assert_eq!(back, 6);
    assert_eq!(far, 6 + 1 + 0x119);

    let lo_hi = |a: u16| [(a & 0xFF) as u8, (a >> 8) as u8];
    assert_eq!(p.bytes[1..3].to_vec(), lo_hi(far).to_vec());
    assert_eq!(p.bytes[4..6].to_vec(), lo_hi(back).to_vec());
    let tail = p.bytes[p.bytes.len() - 6..].to_vec();
    let [b_lo, b_hi] = lo_hi(back);
    let [f_lo, f_hi] = lo_hi(far);
    assert_eq!(tail, vec![0x21, b_lo, b_hi, 0xC2, f_lo, f_hi]);
}

#[test]
fn assembling_twice_is_identical() {
    let src = [
        "start:  MVI B,10   ; counter",
        "loop:   DCR B",
        "        JNZ loop",
        "        CALL done",
        "done:   RET",
    ];
    let a = assemble_program(src).unwrap();
    let b = assemble_program(src).unwrap();
    assert_eq!(a.bytes, b.bytes);
    assert_eq!(a.symbols, b.symbols);
    assert_eq!(a.symbols.symbols(), b.symbols.symbols());
}

#[test]
fn label_on_its_own_line_binds_next_instruction() {
    let p = assemble_program(["  NOP", "entry:", "", "  ; comment", "  HLT", "  JMP entry"]).unwrap();
    assert_eq!(p.symbols.get("entry"), Some(1));
    assert_eq!(p.bytes, vec![0x00, 0x76, 0xC3, 0x01, 0x00]);
}
