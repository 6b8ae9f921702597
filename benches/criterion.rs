use std::fmt;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use typejson::derive::Json;
use typejson::Composite;

#[derive(Clone, Debug, Default, Json, PartialEq)]
#[json(rename_all = "PascalCase")]
struct Address {
    city: String,
    state: String,
    street: String,
}

#[derive(Clone, Debug, Default, Json, PartialEq)]
#[json(rename_all = "PascalCase")]
struct Person {
    id: i32,
    guid_id: uuid::Uuid,
    name: String,
    score: f64,
    active: bool,
    phones: Vec<String>,
    address: Address,
    addresses: Vec<Address>,
}

fn person() -> Person {
    let address = Address {
        city: "Test City".to_owned(),
        state: "TC".to_owned(),
        street: "123 Main St".to_owned(),
    };

    Person {
        id: 1,
        guid_id: uuid::Uuid::from_u128(0x3fa85f64_5717_4562_b3fc_2c963f66afa6),
        name: "Test \"Name\"".to_owned(),
        score: 42.5,
        active: true,
        phones: vec!["123456".to_owned(), "654321".to_owned()],
        address: address.clone(),
        addresses: vec![address; 8],
    }
}

fn bench_deserialize<T: Composite + fmt::Debug + PartialEq>(json: &str, want: &T) {
    if cfg!(debug_assertions) {
        assert_eq!(&typejson::deserialize::<T>(json).unwrap(), want);
    } else {
        typejson::deserialize::<T>(json).unwrap();
    }
}

fn criterion_basic(c: &mut Criterion) {
    let person = person();
    let json = typejson::serialize(&person).unwrap();

    c.bench_function("serialize Person", |b| {
        b.iter(|| typejson::serialize(black_box(&person)).unwrap())
    });
    c.bench_function("deserialize Person", |b| {
        b.iter(|| bench_deserialize(black_box(&json), &person))
    });

    let mut spaced = String::new();
    for ch in json.chars() {
        spaced.push(ch);
        if matches!(ch, ',' | ':' | '[' | '{') {
            spaced.push_str("\n  ");
        }
    }
    c.bench_function("deserialize Person with whitespace", |b| {
        b.iter(|| bench_deserialize(black_box(&spaced), &person))
    });

    let unknown = json.replacen('{', r#"{"Extra":{"a":[1,2,3,{"b":null}],"c":"text"},"#, 1);
    c.bench_function("deserialize Person with unknown keys", |b| {
        b.iter(|| bench_deserialize(black_box(&unknown), &person))
    });
}

criterion_group!(benches, criterion_basic);
criterion_main!(benches);
