//! Tests for back-off family enumeration

#[cfg(test)]
mod tests {
    use markovtile::algorithm::decomposition::sub_kernels;
    use markovtile::io::configuration::DEFAULT_KERNEL;
    use markovtile::{Kernel, SubKernelCache};
    use std::collections::HashSet;

    // Tests the family starts with the kernel and ends with the empty kernel
    // Verified by not prepending the kernel to its family
    #[test]
    fn test_family_bounds() {
        let mut cache = SubKernelCache::new();
        let k = Kernel::from_matrix(&DEFAULT_KERNEL).unwrap();
        let family = sub_kernels(&k, &mut cache);

        assert_eq!(family.first(), Some(&k));
        assert_eq!(family.last(), Some(&Kernel::empty(4)));
    }

    // Tests predecessor counts never increase and kernels are unique
    // Verified by skipping the final sort
    #[test]
    fn test_family_sorted_and_unique() {
        let mut cache = SubKernelCache::new();
        let k = Kernel::from_matrix(&DEFAULT_KERNEL).unwrap();
        let family = sub_kernels(&k, &mut cache);

        let counts: Vec<_> = family.iter().map(Kernel::predecessor_count).collect();
        assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));

        let unique: HashSet<_> = family.iter().collect();
        assert_eq!(unique.len(), family.len());
        assert_eq!(
            family.iter().filter(|sub| sub.is_fully_inactive()).count(),
            1
        );
    }

    // Tests every member is a subset of the kernel with the same side
    // Verified by activating cells while decomposing
    #[test]
    fn test_family_members_are_subsets() {
        let mut cache = SubKernelCache::new();
        let k = Kernel::parse("011\n110\n100").unwrap();
        let family = sub_kernels(&k, &mut cache);

        for sub_kernel in family.iter() {
            assert_eq!(sub_kernel.side(), 3);
            assert!(sub_kernel.active_offsets().all(|(row, col)| k.is_active(row, col)));
        }
    }

    // Tests the exact order of a family with ties among equal predecessor counts
    // Verified by visiting row cells before column cells within a shell
    #[test]
    fn test_tie_break_order() {
        let mut cache = SubKernelCache::new();
        let family = sub_kernels(&Kernel::parse("01\n11").unwrap(), &mut cache);

        let rendered: Vec<String> = family
            .iter()
            .map(|sub_kernel| sub_kernel.to_string().replace('\n', ""))
            .collect();
        assert_eq!(
            rendered,
            vec!["0111", "0110", "0011", "0101", "0010", "0100", "0001", "0000"]
        );
    }

    // Tests a single-predecessor kernel backs off straight to the empty kernel
    // Verified by returning only the kernel itself
    #[test]
    fn test_single_predecessor() {
        let mut cache = SubKernelCache::new();
        let k = Kernel::parse("01\n00").unwrap();
        let family = sub_kernels(&k, &mut cache);

        assert_eq!(family.to_vec(), vec![k, Kernel::empty(2)]);
    }

    // Tests that only the outermost shell is peeled first
    // Verified by removing inner-shell cells before outer ones
    #[test]
    fn test_outer_shell_removed_first() {
        let mut cache = SubKernelCache::new();
        let k = Kernel::parse("010\n000\n001").unwrap();
        let family = sub_kernels(&k, &mut cache);

        // Dropping the outer (2, 2) cell is the only two-to-one step
        assert_eq!(family.len(), 3);
        assert_eq!(family.get(1), Some(&Kernel::parse("010\n000\n000").unwrap()));
    }

    // Tests the family does not depend on the state of the cache
    // Verified by letting cached families skip the sort
    #[test]
    fn test_family_independent_of_cache_state() {
        let k = Kernel::parse("011\n110\n100").unwrap();

        let mut warm = SubKernelCache::new();
        let _ = sub_kernels(&k.without(0, 2), &mut warm);
        let _ = sub_kernels(&k.without(2, 0), &mut warm);
        let from_warm = sub_kernels(&k, &mut warm);

        let mut cold = SubKernelCache::new();
        let from_cold = sub_kernels(&k, &mut cold);

        assert_eq!(from_warm.to_vec(), from_cold.to_vec());
    }
}
