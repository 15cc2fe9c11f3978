mod support;

use petadopt_core::{AdopterDto, Pet, PetDto, Size};
use serde_json::json;
use support::{address, date};

#[test]
fn pet_dto_reads_camel_case_shape_with_specie() {
    let dto: PetDto = serde_json::from_value(json!({
        "name": "Rex",
        "specie": "dog",
        "dateOfBirth": "2020-01-15",
        "adopted": false,
        "size": "small"
    }))
    .unwrap();

    assert_eq!(dto.name, "Rex");
    assert_eq!(dto.species, "dog");
    assert_eq!(dto.date_of_birth, date(2020, 1, 15));
    assert!(!dto.adopted);
    assert_eq!(dto.size, Size::Small);
}

#[test]
fn pet_dto_accepts_species_alias_and_rejects_unknown_size() {
    let dto: PetDto = serde_json::from_value(json!({
        "name": "Mia",
        "species": "cat",
        "dateOfBirth": "2021-06-01",
        "adopted": true,
        "size": "medium"
    }))
    .unwrap();
    assert_eq!(dto.species, "cat");

    let bad = serde_json::from_value::<PetDto>(json!({
        "name": "Mia",
        "specie": "cat",
        "dateOfBirth": "2021-06-01",
        "adopted": true,
        "size": "huge"
    }));
    assert!(bad.is_err());
}

#[test]
fn serialized_pet_can_be_read_back_as_dto() {
    let pet = Pet {
        id: 3,
        name: "Rex".to_string(),
        species: "dog".to_string(),
        date_of_birth: date(2019, 7, 30),
        adopted: true,
        size: Size::Large,
        adopter_id: Some(1),
    };

    let value = serde_json::to_value(&pet).unwrap();
    assert_eq!(value["specie"], "dog");
    assert_eq!(value["dateOfBirth"], "2019-07-30");
    assert_eq!(value["adopterId"], 1);

    let dto: PetDto = serde_json::from_value(value).unwrap();
    assert_eq!(dto.species, pet.species);
    assert_eq!(dto.date_of_birth, pet.date_of_birth);
    assert_eq!(dto.size, pet.size);
}

#[test]
fn adopter_dto_reads_address_and_defaults_optional_fields() {
    let full: AdopterDto = serde_json::from_value(json!({
        "name": "Ana",
        "password": "s3cret",
        "phone": "555-0100",
        "photo": "photos/ana.png",
        "address": {
            "street": "Rua A",
            "number": "42",
            "neighborhood": "Centro",
            "city": "Recife",
            "state": "PE",
            "postalCode": "50000-000"
        }
    }))
    .unwrap();
    assert_eq!(full.address, Some(address("Rua A")));
    assert_eq!(full.photo.as_deref(), Some("photos/ana.png"));
    assert!(!format!("{full:?}").contains("s3cret"));

    let minimal: AdopterDto = serde_json::from_value(json!({
        "name": "Bia",
        "password": "pw",
        "phone": "555-0200"
    }))
    .unwrap();
    assert_eq!(minimal.photo, None);
    assert_eq!(minimal.address, None);
}
