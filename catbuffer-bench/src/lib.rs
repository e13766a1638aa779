//! # Catbuffer Bench
//!
//! Schema generators for resolution benchmarks.

use std::fmt::Write;

const BASE_SCHEMA: &str = r#"
- name: Amount
  type: byte
  size: 8
- name: MosaicId
  type: byte
  size: 8
- name: EntityType
  type: enum
  size: 2
  values:
    - name: RESERVED
      value: 0
- name: Kind
  type: enum
  size: 1
  values:
    - name: ADDRESS
      value: 0
    - name: MOSAIC
      value: 1
    - name: NONE
      value: 2
- name: SizePrefixedEntity
  type: struct
  layout:
    - name: size
      type: byte
      size: 4
- name: EntityBody
  type: struct
  layout:
    - name: signerPublicKey
      type: byte
      size: 32
    - name: version
      type: byte
      size: 1
- name: Transaction
  type: struct
  layout:
    - disposition: inline
      type: SizePrefixedEntity
    - disposition: inline
      type: EntityBody
    - name: type
      type: EntityType
    - name: fee
      type: Amount
- name: Mosaic
  type: struct
  layout:
    - name: mosaicId
      type: MosaicId
    - name: amount
      type: Amount
"#;

/// Builds a schema with `count` transaction structures.
///
/// Each transaction extends `Transaction`, composes a body with a counted
/// mosaic array and a message buffer, and gates two fields on a discriminant.
#[must_use]
pub fn transaction_schema(count: usize) -> String {
    let mut yaml = String::from(BASE_SCHEMA);
    for i in 0..count {
        let _ = write!(
            yaml,
            r#"- name: Sample{i}TransactionBody
  type: struct
  layout:
    - name: kind
      type: Kind
    - name: address
      type: byte
      size: 24
      condition: kind
      condition_value: ADDRESS
    - name: mosaicId
      type: MosaicId
      condition: kind
      condition_value: MOSAIC
    - name: messageSize
      type: byte
      size: 2
    - name: mosaicsCount
      type: byte
      size: 1
    - name: mosaics
      type: Mosaic
      size: mosaicsCount
    - name: message
      type: byte
      size: messageSize
- name: Sample{i}Transaction
  type: struct
  layout:
    - name: TRANSACTION_TYPE
      type: EntityType
      disposition: const
      value: {code}
    - disposition: inline
      type: Transaction
    - disposition: inline
      type: Sample{i}TransactionBody
"#,
            code = 0x4000 + i
        );
    }
    yaml
}
