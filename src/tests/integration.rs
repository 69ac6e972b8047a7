//! Invariants tying the probe, the encoder, and the decoder together.

use crate::encoding::probe;
use crate::geometry::{
    CFrame, Color3, ColorSequence, ColorSequenceKeypoint, EnumItem, NumberRange, NumberSequence,
    NumberSequenceKeypoint, Quaternion, Rect, UDim, UDim2, Vector2, Vector3,
};
use crate::value::{Table, Value};
use crate::{compress, decompress};

/// A graph touching every value kind and every table layout.
fn kitchen_sink() -> Value {
    let mut inventory = Table::new();
    inventory.insert("sword", 1);
    inventory.insert("shield", 2);
    inventory.insert("sword_skin", "gold");

    let mut sparse = Table::new();
    sparse.insert(1, "first");
    sparse.insert(500, "late");

    let mut root = Table::new();
    root.insert("nil", Value::Nil);
    root.insert("yes", true);
    root.insert("no", false);
    root.insert("zero", 0);
    root.insert("tiny", -7);
    root.insert("byte", 200);
    root.insert("short", -20_000);
    root.insert("word", 100_000);
    root.insert("real", 0.125);
    root.insert("name", "ada");
    root.insert("name_again", "ada");
    root.insert("blob", Value::Buffer(vec![0xDE, 0xAD, 0xBE, 0xEF]));
    root.insert("list", Value::from(vec![Value::from(1), Value::from(2), Value::from(3)]));
    root.insert("inventory", inventory);
    root.insert("sparse", sparse);
    root.insert("pos", Value::Vector3(Vector3::new(1.0, 2.0, 3.0)));
    root.insert("size", Value::Vector2(Vector2::new(10.0, 20.0)));
    root.insert(
        "frame",
        Value::CFrame(CFrame::new(
            Vector3::new(0.0, 5.0, 0.0),
            Quaternion::new(0.0, 0.707, 0.0, 0.707),
        )),
    );
    root.insert("tint", Value::Color3(Color3::new(1.0, 0.5, 0.25)));
    root.insert("brick", Value::BrickColor(194));
    root.insert("pad", Value::UDim(UDim::new(0.5, 4)));
    root.insert("anchor", Value::UDim2(UDim2::new(0.0, 10, 1.0, -10)));
    root.insert(
        "viewport",
        Value::Rect(Rect::new(Vector2::new(0.0, 0.0), Vector2::new(800.0, 600.0))),
    );
    root.insert("spread", Value::NumberRange(NumberRange::new(-1.0, 1.0)));
    root.insert(
        "fade",
        Value::NumberSequence(NumberSequence::new(vec![
            NumberSequenceKeypoint::new(0.0, 1.0, 0.0),
            NumberSequenceKeypoint::new(1.0, 0.0, 0.1),
        ])),
    );
    root.insert(
        "gradient",
        Value::ColorSequence(ColorSequence::new(vec![
            ColorSequenceKeypoint::new(0.0, Color3::new(1.0, 0.0, 0.0)),
            ColorSequenceKeypoint::new(1.0, Color3::new(0.0, 0.0, 1.0)),
        ])),
    );
    root.insert("when", Value::DateTime(1_700_000_000_000));
    root.insert("material", Value::EnumItem(EnumItem::new("Material", "Grass")));
    Value::Table(root)
}

fn sample_graphs() -> Vec<Value> {
    vec![
        Value::Nil,
        Value::Bool(true),
        Value::Number(0.0),
        Value::Number(-1.0),
        Value::Number(300.0),
        Value::Number(1e300),
        Value::from("hi"),
        Value::Str(vec![b'x'; 47]),
        Value::Str(vec![b'x'; 48]),
        Value::Buffer((0..=255).collect()),
        Value::Table(Table::new()),
        Value::from(vec![Value::from("a"), Value::from("a"), Value::from("a")]),
        kitchen_sink(),
    ]
}

#[test]
fn probe_size_equals_payload_size() {
    for value in sample_graphs() {
        let mut stack = Vec::new();
        let probed = probe::probe(&value, &mut stack).unwrap().size;
        let payload = compress(&value).unwrap();
        assert_eq!(probed, payload.len(), "size agreement for {}", value.kind());
    }
}

#[test]
fn result_buffer_is_allocated_exactly_once() {
    // A buffer that never grew past its initial reservation has its
    // capacity still equal to the probed size, which equals its length.
    for value in sample_graphs() {
        let payload = compress(&value).unwrap();
        assert_eq!(payload.capacity(), payload.len(), "no regrowth for {}", value.kind());
    }
}

#[test]
fn kitchen_sink_roundtrip() {
    let value = kitchen_sink();
    let payload = compress(&value).unwrap();
    assert_eq!(decompress(&payload).unwrap(), value);
}

#[test]
fn decision_stack_is_rebuilt_per_call() {
    let mut serializer = crate::Serializer::new();
    let big = kitchen_sink();
    let small = Value::Nil;

    let big_payload = serializer.compress(&big).unwrap();
    let small_payload = serializer.compress(&small).unwrap();
    assert_eq!(small_payload, vec![crate::VERSION, 0x00]);

    // Replaying after a larger graph must not leak stale decisions.
    assert_eq!(serializer.compress(&big).unwrap(), big_payload);
}

#[test]
fn intern_state_does_not_leak_between_calls() {
    let repeated = Value::from(vec![Value::from("shared"), Value::from("shared")]);
    let first = compress(&repeated).unwrap();
    let second = compress(&repeated).unwrap();
    // Ids restart from zero every call, so the payloads are identical.
    assert_eq!(first, second);
}

#[test]
fn interning_meets_the_minimality_bound() {
    let word = "abcdef";
    let k = 5usize;
    let table = Table::from(vec![Value::from(word); k]);
    let payload = compress(&Value::Table(table)).unwrap();

    // version + array tag + count + one definition + (k - 1) references.
    let expected = 1 + 1 + 1 + (1 + 1 + word.len()) + (k - 1) * 2;
    assert_eq!(payload.len(), expected);
}
