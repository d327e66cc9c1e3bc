use crisp_base::{Tensor, TensorError};

#[test]
fn test_tensor_new_valid() {
    let tensor = Tensor::new(vec![2, 2, 3], vec![0u8; 12]).unwrap();
    assert_eq!(tensor.shape, vec![2, 2, 3]);
    assert_eq!(tensor.len(), 12);
}

#[test]
fn test_tensor_new_shape_mismatch() {
    let result = Tensor::new(vec![2, 3], vec![1u8, 2, 3]);
    assert!(matches!(
        result,
        Err(TensorError::ShapeMismatch {
            expected: 6,
            got: 3
        })
    ));
}

#[test]
fn test_tensor_new_overflow() {
    let result = Tensor::<u8>::new(vec![usize::MAX, 2], vec![]);
    assert!(matches!(result, Err(TensorError::ShapeOverflow)));
}

#[test]
fn test_tensor_zeros() {
    let tensor = Tensor::<u8>::zeros(vec![4, 4, 3]).unwrap();
    assert_eq!(tensor.shape, vec![4, 4, 3]);
    assert!(tensor.data.iter().all(|&b| b == 0));
}

#[test]
fn test_tensor_ndim_and_empty() {
    let tensor = Tensor::new(vec![2, 3, 1], vec![0u8; 6]).unwrap();
    assert_eq!(tensor.ndim(), 3);
    assert!(!tensor.is_empty());

    let empty = Tensor::<u8>::new(vec![0, 4, 3], vec![]).unwrap();
    assert!(empty.is_empty());
}
